//! Mine-local components and marker types.
//!
//! These are ECS components used only within the mine domain.
//! Cross-domain types live in `crate::shared`.

use bevy::prelude::*;

/// Marker for all entities belonging to the mine scene.
/// Used for bulk despawning when leaving the Playing state.
#[derive(Component, Debug)]
pub struct MineSceneEntity;

/// The scrolling rig that carries the rocks and looping background.
/// Its translation z is the scroll offset.
#[derive(Component, Debug)]
pub struct MineRig;

/// One of the 16 destructible rocks on the mine face.
#[derive(Component, Debug, Clone, Copy)]
pub struct RockCell {
    pub index: usize,
}

/// Marker for the pickaxe root entity.
#[derive(Component, Debug)]
pub struct Pickaxe;

/// The impact flash mesh; scale is set on hit and shrinks each frame.
#[derive(Component, Debug)]
pub struct ImpactFlash;

/// A looping tunnel segment. `phase_shifted` marks the half-period copy.
#[derive(Component, Debug)]
pub struct TunnelSegment {
    pub phase_shifted: bool,
}

/// A looping rail-tie segment, tiled at a quarter of the tunnel period.
#[derive(Component, Debug)]
pub struct RailTie {
    pub phase_shifted: bool,
}
