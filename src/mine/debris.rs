//! Debris bursts — short-lived rock chunks thrown off by pickaxe hits.
//!
//! Every fragment's pose is a pure function of elapsed time since its
//! spawn, so the animation carries no hidden clock state: chunks pop
//! toward the camera, fan out along a random planar direction, then
//! collapse down and inward under a squared-time pull. Fragments are
//! purely cosmetic; they never touch rock state.
//!
//! Lifetimes tick on wall-clock time (`Time<Real>`), not virtual time,
//! so a fragment is gone within one frame of its 500ms expiry even if
//! the frame loop stalls.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::components::{MineRig, MineSceneEntity};
use super::grid::rock_coord;
use super::spawning::RockAssets;

/// Chunk mesh sizes, smallest first. Selection is biased toward the
/// small end by multiplying two uniform draws; keep that exact bias.
pub const CHUNK_SIZE_COUNT: usize = 4;

/// Pick a chunk size index from two independent uniform draws in [0, 1).
pub fn chunk_size_index(r1: f32, r2: f32) -> usize {
    ((r1 * r2 * CHUNK_SIZE_COUNT as f32) as usize).min(CHUNK_SIZE_COUNT - 1)
}

fn lerp(a: f32, b: f32, mix: f32) -> f32 {
    (1.0 - mix) * a + mix * b
}

/// The randomized launch parameters of one fragment, fixed at spawn.
#[derive(Debug, Clone, Copy)]
pub struct FragmentKinematics {
    /// Spawn position, local to the mine rig.
    pub origin: Vec3,
    /// Base orientation as XYZ Euler angles.
    pub base_rot: Vec3,
    /// Per-axis angular velocity scale.
    pub spin: Vec3,
    /// Planar fan-out target.
    pub spread: Vec2,
}

impl FragmentKinematics {
    /// Position `elapsed` seconds after spawn.
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let t = elapsed;
        let z = self.origin.z + t * t * 25.0;
        let x = lerp(self.origin.x, self.spread.x, t);
        let y = lerp(self.origin.y, self.spread.y, t);
        let y = lerp(y, -self.origin.y * 4.0 - 16.0, t * t);
        let x = lerp(x, 0.0, t * t);
        Vec3::new(x, y, z)
    }

    /// Orientation `elapsed` seconds after spawn.
    pub fn rotation_at(&self, elapsed: f32) -> Quat {
        let e = self.base_rot + self.spin * elapsed * 30.0;
        Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
    }
}

/// One live debris chunk.
#[derive(Component, Debug)]
pub struct Fragment {
    pub kinematics: FragmentKinematics,
    /// `Time<Real>` elapsed at spawn.
    pub spawned_at: f32,
    pub lifetime: Timer,
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// System: turn burst requests into fragment entities, parented to the
/// mine rig so they scroll with it. Meshes are attached only when the
/// render-side assets exist; headless runs spawn bare fragments.
pub fn spawn_fragment_bursts(
    mut commands: Commands,
    mut burst_events: EventReader<FragmentBurstEvent>,
    assets: Option<Res<RockAssets>>,
    rig: Query<Entity, With<MineRig>>,
    time: Res<Time<Real>>,
) {
    let mut rng = rand::thread_rng();
    let now = time.elapsed_secs();

    for event in burst_events.read() {
        let coord = rock_coord(event.index);
        let origin = Vec3::new(coord.x, coord.y, -(event.depth as f32));

        for _ in 0..event.count {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let kinematics = FragmentKinematics {
                origin,
                base_rot: Vec3::new(
                    rng.gen::<f32>() * 7.0,
                    rng.gen::<f32>() * 7.0,
                    rng.gen::<f32>() * 7.0,
                ),
                spin: Vec3::new(
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                    rng.gen::<f32>() - 0.5,
                ),
                spread: Vec2::new(angle.cos() * 4.0, angle.sin() * 4.0),
            };

            let mut entity = commands.spawn((
                Fragment {
                    kinematics,
                    spawned_at: now,
                    lifetime: Timer::from_seconds(FRAGMENT_LIFETIME_SECS, TimerMode::Once),
                },
                Transform::from_translation(origin)
                    .with_rotation(kinematics.rotation_at(0.0))
                    .with_scale(Vec3::splat(4.0)),
                Visibility::default(),
                MineSceneEntity,
            ));

            if let Some(assets) = assets.as_deref() {
                let size = chunk_size_index(rng.gen(), rng.gen());
                entity.insert((
                    Mesh3d(assets.chunk_meshes[size].clone()),
                    MeshMaterial3d(assets.chunk_material.clone()),
                ));
            }

            let entity = entity.id();
            if let Ok(rig_entity) = rig.get_single() {
                commands.entity(rig_entity).add_child(entity);
            }
        }
    }
}

/// System: recompute every fragment's local transform from elapsed time.
pub fn animate_fragments(
    mut fragments: Query<(&Fragment, &mut Transform)>,
    time: Res<Time<Real>>,
) {
    let now = time.elapsed_secs();
    for (fragment, mut transform) in fragments.iter_mut() {
        let elapsed = now - fragment.spawned_at;
        transform.translation = fragment.kinematics.position_at(elapsed);
        transform.rotation = fragment.kinematics.rotation_at(elapsed);
    }
}

/// System: expire fragments on wall-clock time. Removal is a despawn of
/// an entity this system just observed, so a scene teardown that beat
/// us to it simply leaves nothing to expire.
pub fn despawn_expired_fragments(
    mut commands: Commands,
    mut fragments: Query<(Entity, &mut Fragment)>,
    time: Res<Time<Real>>,
) {
    for (entity, mut fragment) in fragments.iter_mut() {
        fragment.lifetime.tick(time.delta());
        if fragment.lifetime.finished() {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinematics() -> FragmentKinematics {
        FragmentKinematics {
            origin: Vec3::new(0.8, -0.8, -1.0),
            base_rot: Vec3::new(1.0, 2.0, 3.0),
            spin: Vec3::new(0.3, -0.2, 0.1),
            spread: Vec2::new(4.0, 0.0),
        }
    }

    #[test]
    fn test_pose_at_spawn_is_origin() {
        let k = kinematics();
        assert!((k.position_at(0.0) - k.origin).length() < 1e-6);
        let expected = Quat::from_euler(EulerRot::XYZ, 1.0, 2.0, 3.0);
        assert!(k.rotation_at(0.0).angle_between(expected) < 1e-6);
    }

    #[test]
    fn test_z_arcs_toward_camera_quadratically() {
        let k = kinematics();
        let z1 = k.position_at(0.1).z - k.origin.z;
        let z2 = k.position_at(0.2).z - k.origin.z;
        assert!((z1 - 0.25).abs() < 1e-5);
        assert!((z2 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pose_is_pure_in_elapsed_time() {
        let k = kinematics();
        assert_eq!(k.position_at(0.37), k.position_at(0.37));
        assert_eq!(k.rotation_at(0.37), k.rotation_at(0.37));
    }

    #[test]
    fn test_late_pose_collapses_inward() {
        let k = kinematics();
        // By the end of life the squared-time pull dominates: x heads to
        // 0 and y toward the drop target below the face.
        let early = k.position_at(0.05);
        let late = k.position_at(0.5);
        assert!(late.x.abs() < early.x.abs() + 4.0);
        assert!(late.y < early.y);
    }

    #[test]
    fn test_chunk_size_bias() {
        // Squaring a uniform biases selection toward small chunks: any
        // draw pair with r1*r2 < 0.25 lands on the two smallest sizes.
        assert_eq!(chunk_size_index(0.0, 0.9), 0);
        assert_eq!(chunk_size_index(0.4, 0.4), 0);
        assert_eq!(chunk_size_index(0.7, 0.6), 1);
        assert_eq!(chunk_size_index(0.9, 0.9), 3);
        // Never out of bounds, even at the top of the range.
        assert_eq!(chunk_size_index(1.0, 1.0), 3);
    }

    #[test]
    fn test_spin_accumulates_linearly() {
        let k = FragmentKinematics {
            origin: Vec3::ZERO,
            base_rot: Vec3::ZERO,
            spin: Vec3::new(0.0, 0.0, 0.01),
            spread: Vec2::ZERO,
        };
        // spin.z * t * 30 = 0.01 * 0.2 * 30 = 0.06 radians about z.
        let expected = Quat::from_euler(EulerRot::XYZ, 0.0, 0.0, 0.06);
        assert!(k.rotation_at(0.2).angle_between(expected) < 1e-5);
    }
}
