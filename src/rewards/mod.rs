//! Reward classification and stat tracking — passive event listeners
//! that bump the `MineStats` counters.
//!
//! Each system reads one shared event stream and updates the matching
//! field. No mining logic is changed here; the one active piece is the
//! classifier, which turns a cracked cell into a `GemCollectedEvent`
//! according to the configured `RewardRule`.

use bevy::prelude::*;

use crate::shared::*;

pub struct RewardsPlugin;

impl Plugin for RewardsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MineStats>();
        app.add_systems(
            Update,
            (
                (classify_cracked_rocks, track_gems).chain(),
                track_swings,
                track_cracks,
            )
                .in_set(UpdateSet::Observe)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System: reward classification
// ─────────────────────────────────────────────────────────────────────────────

/// Fires exactly one `GemCollectedEvent` per cracked cell, keyed by the
/// configured rule.
pub fn classify_cracked_rocks(
    mut cracked_events: EventReader<RockCrackedEvent>,
    config: Res<GameConfig>,
    mut gem_events: EventWriter<GemCollectedEvent>,
) {
    for event in cracked_events.read() {
        gem_events.send(GemCollectedEvent {
            kind: config.reward_rule.classify(event.index),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System: swings
// ─────────────────────────────────────────────────────────────────────────────

/// Increments `MineStats::swings` for every connecting press.
pub fn track_swings(mut events: EventReader<SwingEvent>, mut stats: ResMut<MineStats>) {
    for _ev in events.read() {
        stats.swings = stats.swings.saturating_add(1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System: cracks + deepest tier
// ─────────────────────────────────────────────────────────────────────────────

/// Increments `MineStats::rocks_cracked` per crack and keeps the
/// deepest-tier high-water mark.
pub fn track_cracks(mut events: EventReader<RockCrackedEvent>, mut stats: ResMut<MineStats>) {
    for ev in events.read() {
        stats.rocks_cracked = stats.rocks_cracked.saturating_add(1);
        if ev.depth > stats.deepest_tier {
            stats.deepest_tier = ev.depth;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// System: gems
// ─────────────────────────────────────────────────────────────────────────────

/// Increments the per-kind gem counter for every collection.
pub fn track_gems(mut events: EventReader<GemCollectedEvent>, mut stats: ResMut<MineStats>) {
    for ev in events.read() {
        let count = stats.gems.entry(ev.kind).or_insert(0);
        *count = count.saturating_add(1);
    }
}
