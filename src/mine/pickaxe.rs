//! Pickaxe strike animation — a single decaying action scalar drives the
//! blend between the resting pose and the latest impact-derived pose.
//!
//! On a connecting swing the scalar snaps to 1 and the strike pose is
//! anchored at the impact point; each frame the pose is blended by the
//! squared scalar, then the scalar decays. Squaring gives the fast
//! snap-to-target and smooth ease back to rest.

use bevy::prelude::*;

use crate::shared::*;
use super::components::Pickaxe;

/// Where the pickaxe rests between swings.
pub const PICKAXE_HOME_POSITION: Vec3 = Vec3::new(0.75, -1.25, 2.0);
pub const PICKAXE_HOME_EULER: Vec3 = Vec3::new(0.0, -1.25, -0.75);

/// The strike pose looks toward this point before the angle offsets.
const STRIKE_FOCUS: Vec3 = Vec3::new(0.0, 0.0, 3.0);

pub fn pickaxe_home_rotation() -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        PICKAXE_HOME_EULER.x,
        PICKAXE_HOME_EULER.y,
        PICKAXE_HOME_EULER.z,
    )
}

/// Swing animation state. Exactly one exists per game.
#[derive(Resource, Debug, Clone)]
pub struct PickaxeSwing {
    /// 1.0 at the instant of a hit, decaying to 0 at rest. Never negative.
    pub action: f32,
    pub target_position: Vec3,
    pub target_rotation: Quat,
}

impl Default for PickaxeSwing {
    fn default() -> Self {
        Self {
            action: 0.0,
            target_position: PICKAXE_HOME_POSITION,
            target_rotation: pickaxe_home_rotation(),
        }
    }
}

/// Ease-in blend factor for the current action value.
pub fn blend_factor(action: f32) -> f32 {
    action * action
}

/// Build the strike pose for an impact point: face the fixed focus
/// point, then roll a quarter turn and shift down and back along the
/// local axes so the head, not the handle, meets the rock.
pub fn strike_transform(impact: Vec3) -> Transform {
    let mut transform = Transform::from_translation(impact).looking_at(STRIKE_FOCUS, Vec3::Y);
    transform.rotate_local_y(-std::f32::consts::FRAC_PI_2);
    let rotation = transform.rotation;
    transform.translation += rotation * Vec3::new(0.0, -1.0, 0.0);
    transform.translation += rotation * Vec3::new(0.0, 0.0, -0.2);
    transform
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// System: re-arm the swing on every connecting press. `action` resets
/// to exactly 1.0 no matter where the previous decay had reached.
pub fn cue_strike(
    mut swing_events: EventReader<SwingEvent>,
    mut swing: ResMut<PickaxeSwing>,
) {
    for event in swing_events.read() {
        let strike = strike_transform(event.impact);
        swing.target_position = strike.translation;
        swing.target_rotation = strike.rotation;
        swing.action = 1.0;
    }
}

/// System: blend the pickaxe between rest and strike poses, then decay
/// the action scalar. Pose is computed before the decay so the frame
/// right after a hit shows the full strike.
pub fn animate_pickaxe(
    mut swing: ResMut<PickaxeSwing>,
    mut pickaxes: Query<&mut Transform, With<Pickaxe>>,
    time: Res<Time>,
) {
    let blend = blend_factor(swing.action);
    for mut transform in pickaxes.iter_mut() {
        transform.translation = PICKAXE_HOME_POSITION.lerp(swing.target_position, blend);
        transform.rotation = pickaxe_home_rotation().slerp(swing.target_rotation, blend);
    }

    if swing.action > 0.0 {
        swing.action = (swing.action - time.delta_secs() * PICKAXE_DECAY_RATE).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_is_eased() {
        assert_eq!(blend_factor(0.0), 0.0);
        assert_eq!(blend_factor(1.0), 1.0);
        assert!(blend_factor(0.5) < 0.5, "blend should undershoot mid-decay");
    }

    #[test]
    fn test_strike_transform_offsets_from_impact() {
        let impact = Vec3::new(-0.7, -0.7, 0.9);
        let strike = strike_transform(impact);
        // The local offsets move the anchor away from the raw impact
        // point by exactly their combined length.
        let offset = strike.translation - impact;
        let expected = Vec3::new(0.0, -1.0, -0.2).length();
        assert!((offset.length() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_strike_transform_is_deterministic() {
        let a = strike_transform(Vec3::new(0.3, -0.2, 1.0));
        let b = strike_transform(Vec3::new(0.3, -0.2, 1.0));
        assert_eq!(a.translation, b.translation);
        assert_eq!(a.rotation, b.rotation);
    }

    #[test]
    fn test_default_swing_is_at_rest() {
        let swing = PickaxeSwing::default();
        assert_eq!(swing.action, 0.0);
        assert_eq!(swing.target_position, PICKAXE_HOME_POSITION);
    }
}
