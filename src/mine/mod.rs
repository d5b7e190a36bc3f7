//! Mine domain plugin for Mining Quest.
//!
//! Provides:
//! - The 4x4 destructible rock face (depth/health tracking per cell)
//! - Pointer-ray interaction resolution (hit testing, highlights)
//! - Debris bursts with wall-clock lifetimes
//! - Pickaxe strike animation from a decaying action scalar
//! - The scrolling rig with looping tunnel/rail background
//! - Scene spawn/teardown and the in-game HUD
//!
//! Per frame, the advance set plays out animation and scroll first, then
//! the resolve set applies this frame's pointer input. That order keeps
//! every pointer mutation visible by the end of the same update, and
//! leaves the action scalar at exactly 1.0 on the frame of a hit.

pub mod components;
pub mod debris;
pub mod grid;
pub mod hud;
pub mod interaction;
pub mod pickaxe;
pub mod rocks;
pub mod scroll;
pub mod spawning;

pub use components::{ImpactFlash, MineRig, MineSceneEntity, Pickaxe, RailTie, RockCell, TunnelSegment};
pub use debris::{chunk_size_index, Fragment, FragmentKinematics};
pub use grid::rock_coord;
pub use interaction::{interaction_info, InteractionInfo};
pub use pickaxe::{
    blend_factor, pickaxe_home_rotation, strike_transform, PickaxeSwing, PICKAXE_HOME_POSITION,
};
pub use rocks::{HitOutcome, RockField};
pub use scroll::{scroll_target, tiled_segment_z};
pub use spawning::RockAssets;

use bevy::prelude::*;
use crate::shared::*;

pub struct MinePlugin;

impl Plugin for MinePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), (
            spawning::setup_mine_scene,
            hud::spawn_mine_hud,
        ));
        // Pausing keeps the scene alive; only returning to the menu
        // unmounts it (which also cancels pending fragment removals).
        app.add_systems(OnEnter(GameState::MainMenu), (
            spawning::despawn_mine_scene,
            hud::despawn_mine_hud,
        ));

        app.add_systems(
            Update,
            (
                pickaxe::animate_pickaxe,
                debris::animate_fragments,
                debris::despawn_expired_fragments,
                spawning::animate_flash,
                (scroll::advance_scroll, scroll::position_background).chain(),
            )
                .in_set(UpdateSet::Advance)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            (
                rocks::handle_pointer_down,
                pickaxe::cue_strike,
                debris::spawn_fragment_bursts,
                spawning::trigger_flash,
                rocks::update_highlights,
                spawning::apply_rock_visuals.run_if(resource_exists::<RockAssets>),
            )
                .chain()
                .in_set(UpdateSet::Resolve)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            (hud::update_gem_counter, hud::update_dig_stats)
                .in_set(UpdateSet::Observe)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
