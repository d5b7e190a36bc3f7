//! In-game HUD overlay: gem counters, swing/break tallies, deepest tier.
//!
//! Purely observational — reads `MineStats` every frame and rewrites the
//! label text. Spawned and despawned with the Playing state.

use bevy::prelude::*;

use crate::shared::*;

/// Marker for mine HUD entities so we can despawn them.
#[derive(Component, Debug)]
pub struct MineHudEntity;

/// Marker for the gem counter line.
#[derive(Component, Debug)]
pub struct GemCounterLabel;

/// Marker for the swing/break/depth line.
#[derive(Component, Debug)]
pub struct DigStatsLabel;

/// System: spawn the HUD when entering the mine.
pub fn spawn_mine_hud(mut commands: Commands, existing: Query<(), With<MineHudEntity>>) {
    // Resuming from pause finds the HUD already up.
    if !existing.is_empty() {
        return;
    }

    commands.spawn((
        Text::new("Sun 0   Moon 0"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 1.0, 0.52)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(14.0),
            ..default()
        },
        MineHudEntity,
        GemCounterLabel,
    ));

    commands.spawn((
        Text::new("Swings 0  Breaks 0  Depth 0"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.82, 0.7)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(44.0),
            left: Val::Px(14.0),
            ..default()
        },
        MineHudEntity,
        DigStatsLabel,
    ));
}

/// System: refresh the gem counter line.
pub fn update_gem_counter(
    stats: Res<MineStats>,
    config: Res<GameConfig>,
    mut labels: Query<&mut Text, With<GemCounterLabel>>,
) {
    if !stats.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        **text = match config.reward_rule {
            RewardRule::Single => format!("Gems {}", stats.gems_total()),
            RewardRule::Parity => format!(
                "{} {}   {} {}",
                GemKind::Sun.label(),
                stats.gems_of(GemKind::Sun),
                GemKind::Moon.label(),
                stats.gems_of(GemKind::Moon)
            ),
        };
    }
}

/// System: refresh the swing/break/depth line.
pub fn update_dig_stats(
    stats: Res<MineStats>,
    mut labels: Query<&mut Text, With<DigStatsLabel>>,
) {
    if !stats.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        **text = format!(
            "Swings {}  Breaks {}  Depth {}",
            stats.swings, stats.rocks_cracked, stats.deepest_tier
        );
    }
}

/// System: remove the HUD when leaving the mine.
pub fn despawn_mine_hud(mut commands: Commands, entities: Query<Entity, With<MineHudEntity>>) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
}
