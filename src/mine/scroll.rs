//! Scene scroll driver — creeps the rig into the rock face and loops the
//! tunnel/rail background to fake an infinite corridor.
//!
//! The rig's z offset only ever advances, at one unit per second, and is
//! capped at `min(cell depths) - 1`: the corridor deepens only once every
//! cell has been cracked through at least one more tier. Two copies of
//! each background segment are repositioned modulo their period (one of
//! them phase-shifted by half a period) so the corridor never runs out.

use bevy::prelude::*;

use crate::shared::*;
use super::components::{MineRig, RailTie, TunnelSegment};
use super::rocks::RockField;

/// The z the rig may advance to for a given shallowest depth.
pub fn scroll_target(min_depth: u32) -> f32 {
    min_depth as f32 - 1.0
}

/// z position for a looping segment given the rig offset and period.
/// The phase-shifted copy sits half a period behind its twin.
pub fn tiled_segment_z(rig_z: f32, period: f32, phase_shifted: bool) -> f32 {
    if phase_shifted {
        (-rig_z / period + 0.5).round() * period - period / 2.0
    } else {
        (-rig_z / period).round() * period
    }
}

// ─── Systems ─────────────────────────────────────────────────────────────────

/// System: advance the rig toward the scroll target. Monotone; clamps
/// so a long frame never overshoots the cap.
pub fn advance_scroll(
    field: Res<RockField>,
    mut rigs: Query<&mut Transform, With<MineRig>>,
    time: Res<Time>,
) {
    let target = scroll_target(field.min_depth());
    for mut transform in rigs.iter_mut() {
        if transform.translation.z < target {
            transform.translation.z =
                (transform.translation.z + time.delta_secs() * SCROLL_RATE).min(target);
        }
    }
}

/// System: retile the looping background segments against the rig offset.
pub fn position_background(
    rigs: Query<&Transform, (With<MineRig>, Without<TunnelSegment>, Without<RailTie>)>,
    mut tunnels: Query<(&TunnelSegment, &mut Transform), Without<RailTie>>,
    mut ties: Query<(&RailTie, &mut Transform), Without<TunnelSegment>>,
) {
    let Ok(rig_transform) = rigs.get_single() else {
        return;
    };
    let rig_z = rig_transform.translation.z;

    for (segment, mut transform) in tunnels.iter_mut() {
        transform.translation.z = tiled_segment_z(rig_z, TUNNEL_PERIOD, segment.phase_shifted);
    }
    for (tie, mut transform) in ties.iter_mut() {
        transform.translation.z = tiled_segment_z(rig_z, RAIL_TIE_PERIOD, tie.phase_shifted);
    }
}
