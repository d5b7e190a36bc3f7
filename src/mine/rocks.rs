//! Rock state tracking — per-cell excavation depth and remaining health.
//!
//! All candidate cells of one pointer-down are processed in a single
//! pass; exactly one combined `SwingEvent` fires afterwards so a press
//! that straddles two cells produces one feedback signal, not two.

use bevy::prelude::*;

use crate::shared::*;
use super::components::MineRig;
use super::interaction::interaction_info;

/// Outcome of one hit on one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Debris fragments to spawn for this hit.
    pub fragments: u8,
    /// The cell's excavation tier at the moment of the hit.
    pub depth: u32,
    pub cracked: bool,
}

/// The 16 cells of the mine face. Cells live for the whole session;
/// only their numeric attributes mutate.
#[derive(Resource, Debug, Clone)]
pub struct RockField {
    pub depths: [u32; ROCK_COUNT],
    pub healths: [u8; ROCK_COUNT],
    pub highlights: [bool; ROCK_COUNT],
}

impl Default for RockField {
    fn default() -> Self {
        Self {
            depths: [0; ROCK_COUNT],
            healths: [ROCK_START_HEALTH; ROCK_COUNT],
            highlights: [false; ROCK_COUNT],
        }
    }
}

impl RockField {
    /// Apply one pickaxe hit to `index`. Health never rests at zero:
    /// the final hit cracks the face, deepens the cell, and resets
    /// health in the same update.
    pub fn apply_hit(&mut self, index: usize) -> HitOutcome {
        let depth = self.depths[index];
        if self.healths[index] > 1 {
            self.healths[index] -= 1;
            HitOutcome {
                fragments: 1,
                depth,
                cracked: false,
            }
        } else {
            self.depths[index] += 1;
            self.healths[index] = ROCK_START_HEALTH;
            HitOutcome {
                fragments: 5,
                depth,
                cracked: true,
            }
        }
    }

    /// Shallowest excavation tier across all cells; the scroll driver
    /// may never advance past `min_depth() - 1`.
    pub fn min_depth(&self) -> u32 {
        self.depths.iter().copied().min().unwrap_or(0)
    }
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// System: resolve pointer-downs against the rock face and mutate cell
/// state. Emits one `SwingEvent` per connecting press, one
/// `RockCrackedEvent` per cracked cell, and a `FragmentBurstEvent` per
/// hit cell. A press that touches nothing is a no-op.
pub fn handle_pointer_down(
    mut down_events: EventReader<PointerDownEvent>,
    mut field: ResMut<RockField>,
    rig: Query<&Transform, With<MineRig>>,
    mut swing_events: EventWriter<SwingEvent>,
    mut cracked_events: EventWriter<RockCrackedEvent>,
    mut burst_events: EventWriter<FragmentBurstEvent>,
) {
    let Ok(rig_transform) = rig.get_single() else {
        return;
    };
    let rig_z = rig_transform.translation.z;

    for event in down_events.read() {
        let info = interaction_info(event.ray, &field.depths, rig_z);
        if !info.is_hit() {
            continue;
        }

        let mut any_cracked = false;
        for &i in &info.candidates {
            let outcome = field.apply_hit(i);
            burst_events.send(FragmentBurstEvent {
                index: i,
                depth: outcome.depth,
                count: outcome.fragments,
            });
            if outcome.cracked {
                any_cracked = true;
                cracked_events.send(RockCrackedEvent {
                    index: i,
                    depth: field.depths[i],
                });
            }
        }

        swing_events.send(SwingEvent {
            candidates: info.candidates.len(),
            cracked: any_cracked,
            impact: info.impact,
        });
    }
}

/// System: derive per-cell highlight flags from the latest pointer ray.
/// A press counts too, so a crack that pushes a cell out of reach drops
/// its highlight in the same update.
pub fn update_highlights(
    mut move_events: EventReader<PointerMoveEvent>,
    mut down_events: EventReader<PointerDownEvent>,
    mut field: ResMut<RockField>,
    rig: Query<&Transform, With<MineRig>>,
) {
    let Ok(rig_transform) = rig.get_single() else {
        return;
    };
    let rig_z = rig_transform.translation.z;

    // Only the newest ray matters when several arrive in one frame.
    let last_move = move_events.read().last().map(|event| event.ray);
    let last_down = down_events.read().last().map(|event| event.ray);
    let Some(ray) = last_down.or(last_move) else {
        return;
    };

    let info = interaction_info(ray, &field.depths, rig_z);
    for i in 0..ROCK_COUNT {
        field.highlights[i] = info.candidates.contains(&i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_never_observed_at_zero() {
        let mut field = RockField::default();
        for _ in 0..20 {
            field.apply_hit(7);
            assert!(
                (1..=3).contains(&field.healths[7]),
                "health must stay in 1..=3, got {}",
                field.healths[7]
            );
        }
    }

    #[test]
    fn test_partial_hit_decrements_health_only() {
        let mut field = RockField::default();
        let outcome = field.apply_hit(3);
        assert_eq!(outcome, HitOutcome { fragments: 1, depth: 0, cracked: false });
        assert_eq!(field.healths[3], 2);
        assert_eq!(field.depths[3], 0);
    }

    #[test]
    fn test_third_hit_cracks_and_resets() {
        let mut field = RockField::default();
        field.apply_hit(5);
        field.apply_hit(5);
        assert_eq!(field.healths[5], 1);
        assert_eq!(field.depths[5], 0);

        let outcome = field.apply_hit(5);
        assert!(outcome.cracked);
        assert_eq!(outcome.fragments, 5);
        assert_eq!(outcome.depth, 0, "burst spawns at the pre-crack depth");
        assert_eq!(field.healths[5], 3);
        assert_eq!(field.depths[5], 1);
    }

    #[test]
    fn test_depth_is_monotone() {
        let mut field = RockField::default();
        let mut last = 0;
        for _ in 0..12 {
            field.apply_hit(0);
            assert!(field.depths[0] >= last);
            last = field.depths[0];
        }
        assert_eq!(field.depths[0], 4);
    }

    #[test]
    fn test_min_depth_tracks_shallowest_cell() {
        let mut field = RockField::default();
        for _ in 0..6 {
            field.apply_hit(9);
        }
        assert_eq!(field.depths[9], 2);
        assert_eq!(field.min_depth(), 0, "untouched cells pin the minimum");

        for i in 0..ROCK_COUNT {
            for _ in 0..3 {
                field.apply_hit(i);
            }
        }
        assert_eq!(field.min_depth(), 1);
    }
}
