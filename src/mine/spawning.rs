//! Mine scene setup and teardown.
//!
//! The repo ships no model assets; every mesh is generated (sphere
//! rocks, cuboid tunnel walls, rails, pickaxe). Entities are tagged so
//! returning to the main menu bulk-despawns the whole scene, which also
//! tears down any in-flight debris fragments with it.

use bevy::prelude::*;

use crate::shared::*;
use super::components::*;
use super::debris::CHUNK_SIZE_COUNT;
use super::grid::rock_coord;
use super::pickaxe::{pickaxe_home_rotation, PickaxeSwing, PICKAXE_HOME_POSITION};
use super::rocks::RockField;

/// Generated mesh/material handles shared by the mine scene and the
/// debris spawner. Absent in headless runs.
#[derive(Resource, Debug, Clone)]
pub struct RockAssets {
    pub rock_mesh: Handle<Mesh>,
    pub rock_material: Handle<StandardMaterial>,
    pub rock_highlight_material: Handle<StandardMaterial>,
    pub chunk_meshes: [Handle<Mesh>; CHUNK_SIZE_COUNT],
    pub chunk_material: Handle<StandardMaterial>,
}

/// System: build the mine scene and reset the run's mutable state.
/// Re-entering Playing from Paused finds the scene intact and leaves it
/// (and the run's progress) alone; teardown happens on the main menu.
pub fn setup_mine_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<(), With<MineRig>>,
) {
    if !existing.is_empty() {
        return;
    }

    commands.insert_resource(RockField::default());
    commands.insert_resource(PickaxeSwing::default());
    commands.insert_resource(MineStats::default());

    let rock_mesh = meshes.add(Sphere::new(ROCK_RADIUS));
    let rock_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.4, 0.38),
        perceptual_roughness: 0.95,
        ..default()
    });
    let rock_highlight_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.46, 0.4),
        emissive: LinearRgba::rgb(0.125, 0.25, 0.0),
        perceptual_roughness: 0.95,
        ..default()
    });

    // Chunk meshes, smallest first; the debris spawner draws an index
    // with its size bias.
    let chunk_sizes = [0.05, 0.08, 0.12, 0.16];
    let chunk_meshes = chunk_sizes.map(|s| meshes.add(Mesh::from(Cuboid::new(s, s, s))));
    let chunk_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.36, 0.33),
        perceptual_roughness: 1.0,
        ..default()
    });

    let assets = RockAssets {
        rock_mesh: rock_mesh.clone(),
        rock_material: rock_material.clone(),
        rock_highlight_material,
        chunk_meshes,
        chunk_material,
    };
    commands.insert_resource(assets);

    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.16, 0.13, 0.11),
        perceptual_roughness: 1.0,
        ..default()
    });
    let wood_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.24, 0.14),
        perceptual_roughness: 0.9,
        ..default()
    });
    let metal_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.55, 0.6),
        perceptual_roughness: 0.4,
        metallic: 0.8,
        ..default()
    });

    // The scrolling rig: rocks plus the looping corridor segments.
    commands
        .spawn((
            MineRig,
            MineSceneEntity,
            Transform::from_xyz(0.0, 0.0, -1.0),
            Visibility::default(),
        ))
        .with_children(|rig| {
            for index in 0..ROCK_COUNT {
                let coord = rock_coord(index);
                rig.spawn((
                    RockCell { index },
                    Mesh3d(rock_mesh.clone()),
                    MeshMaterial3d(rock_material.clone()),
                    Transform::from_xyz(coord.x, coord.y, 0.0),
                ));
            }

            for phase_shifted in [false, true] {
                rig.spawn((
                    TunnelSegment { phase_shifted },
                    Transform::default(),
                    Visibility::default(),
                ))
                .with_children(|segment| {
                    let wall = meshes.add(Cuboid::new(0.4, 9.0, TUNNEL_PERIOD));
                    let slab = meshes.add(Cuboid::new(9.4, 0.4, TUNNEL_PERIOD));
                    segment.spawn((
                        Mesh3d(wall.clone()),
                        MeshMaterial3d(wall_material.clone()),
                        Transform::from_xyz(-4.5, 0.0, 0.0),
                    ));
                    segment.spawn((
                        Mesh3d(wall),
                        MeshMaterial3d(wall_material.clone()),
                        Transform::from_xyz(4.5, 0.0, 0.0),
                    ));
                    segment.spawn((
                        Mesh3d(slab.clone()),
                        MeshMaterial3d(wall_material.clone()),
                        Transform::from_xyz(0.0, -4.5, 0.0),
                    ));
                    segment.spawn((
                        Mesh3d(slab),
                        MeshMaterial3d(wall_material.clone()),
                        Transform::from_xyz(0.0, 4.5, 0.0),
                    ));
                });

                rig.spawn((
                    RailTie { phase_shifted },
                    Mesh3d(meshes.add(Cuboid::new(2.4, 0.3, 0.6))),
                    MeshMaterial3d(wood_material.clone()),
                    Transform::from_xyz(0.7, -3.0, 0.0),
                ));
            }
        });

    // Static rails in front of the face.
    for x in [-0.5, 0.5] {
        commands.spawn((
            MineSceneEntity,
            Mesh3d(meshes.add(Cuboid::new(0.12, 0.12, 24.0))),
            MeshMaterial3d(metal_material.clone()),
            Transform::from_xyz(x, -2.7, 2.5),
        ));
    }

    // Pickaxe: handle plus head, at the resting pose.
    commands
        .spawn((
            Pickaxe,
            MineSceneEntity,
            Transform::from_translation(PICKAXE_HOME_POSITION)
                .with_rotation(pickaxe_home_rotation())
                .with_scale(Vec3::splat(2.0)),
            Visibility::default(),
        ))
        .with_children(|pickaxe| {
            pickaxe.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.12, 1.6, 0.12))),
                MeshMaterial3d(wood_material.clone()),
                Transform::default(),
            ));
            pickaxe.spawn((
                Mesh3d(meshes.add(Cuboid::new(0.9, 0.18, 0.18))),
                MeshMaterial3d(metal_material),
                Transform::from_xyz(0.0, 0.8, 0.0),
            ));
        });

    // Impact flash, hidden until a swing connects.
    commands.spawn((
        ImpactFlash,
        MineSceneEntity,
        Mesh3d(meshes.add(Sphere::new(1.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.4),
            emissive: LinearRgba::rgb(3.25, 2.75, 1.25),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, 2.0).with_scale(Vec3::splat(0.3)),
        Visibility::Hidden,
    ));

    // Warm headlamp glow over the face.
    commands.spawn((
        MineSceneEntity,
        PointLight {
            intensity: 2_000_000.0,
            color: Color::srgb(1.0, 0.7, 0.3),
            range: 40.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));

    info!("Mine scene spawned: {} rocks", ROCK_COUNT);
}

/// System: bulk-despawn the scene, cancelling fragment lifetimes with it.
pub fn despawn_mine_scene(
    mut commands: Commands,
    entities: Query<Entity, (With<MineSceneEntity>, Without<Parent>)>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

// ─── Per-frame visuals ───────────────────────────────────────────────────────

/// System: push tracked cell state into the rock meshes — recession by
/// depth, a small scale step per hit taken, highlight material swap.
pub fn apply_rock_visuals(
    field: Res<RockField>,
    assets: Res<RockAssets>,
    mut rocks: Query<(
        &RockCell,
        &mut Transform,
        &mut MeshMaterial3d<StandardMaterial>,
    )>,
) {
    for (cell, mut transform, mut material) in rocks.iter_mut() {
        let depth = field.depths[cell.index];
        let health = field.healths[cell.index];
        transform.translation.z = -(depth as f32);
        transform.scale = Vec3::splat(0.85 + 0.05 * health as f32);

        let wanted = if field.highlights[cell.index] {
            &assets.rock_highlight_material
        } else {
            &assets.rock_material
        };
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// System: place and arm the flash on every connecting swing.
pub fn trigger_flash(
    mut swing_events: EventReader<SwingEvent>,
    mut flashes: Query<(&mut Transform, &mut Visibility), With<ImpactFlash>>,
) {
    for event in swing_events.read() {
        for (mut transform, mut visibility) in flashes.iter_mut() {
            transform.translation = event.impact;
            transform.scale = Vec3::splat(0.5);
            *visibility = Visibility::Visible;
        }
    }
}

/// System: shrink the flash each frame and hide it once spent.
pub fn animate_flash(
    mut flashes: Query<(&mut Transform, &mut Visibility), With<ImpactFlash>>,
    time: Res<Time>,
) {
    for (mut transform, mut visibility) in flashes.iter_mut() {
        let scale = transform.scale.x - FLASH_SHRINK_RATE * time.delta_secs();
        if scale > 0.0 {
            transform.scale = Vec3::splat(scale);
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}
