//! Shared components, resources, events, and states for Mining Quest.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    Playing,
    Paused,
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SETS — cross-domain frame ordering
// ═══════════════════════════════════════════════════════════════════════

/// Frame phases, chained in `main.rs`. Animation and scroll play out
/// first; this frame's pointer input resolves second; observers (stats,
/// HUD, audio cues) read the results last. The chain guarantees every
/// pointer mutation is visible by the end of the same update.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSet {
    Advance,
    Resolve,
    Observe,
}

// ═══════════════════════════════════════════════════════════════════════
// REWARDS
// ═══════════════════════════════════════════════════════════════════════

/// The two gem flavors minted by the mine. Variants of the demo either
/// split rewards across both kinds or award only one of them; which rule
/// applies is a `GameConfig` choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemKind {
    Sun,
    Moon,
}

impl GemKind {
    pub fn label(self) -> &'static str {
        match self {
            GemKind::Sun => "Sun",
            GemKind::Moon => "Moon",
        }
    }
}

/// Maps a cracked cell index to the gem it awards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RewardRule {
    /// Every crack awards a Sun gem.
    Single,
    /// Even cell indices award Sun, odd award Moon.
    #[default]
    Parity,
}

impl RewardRule {
    pub fn classify(self, index: usize) -> GemKind {
        match self {
            RewardRule::Single => GemKind::Sun,
            RewardRule::Parity => {
                if index % 2 == 0 {
                    GemKind::Sun
                } else {
                    GemKind::Moon
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG
// ═══════════════════════════════════════════════════════════════════════

/// Game configuration, resolved by the data plugin during Loading.
/// An optional RON file can override the embedded defaults; omitted
/// fields keep their default values.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub reward_rule: RewardRule,
    pub music_enabled: bool,
    pub sfx_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            reward_rule: RewardRule::default(),
            music_enabled: true,
            sfx_enabled: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MINE STATS — cumulative counters for the HUD
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MineStats {
    /// Pointer-downs that connected with at least one rock.
    pub swings: u64,
    /// Rock faces cracked through (health driven to zero).
    pub rocks_cracked: u64,
    /// Deepest excavation tier reached by any cell.
    pub deepest_tier: u32,
    /// Gems collected, per kind.
    pub gems: HashMap<GemKind, u64>,
}

impl MineStats {
    pub fn gems_of(&self, kind: GemKind) -> u64 {
        self.gems.get(&kind).copied().unwrap_or(0)
    }

    pub fn gems_total(&self) -> u64 {
        self.gems.values().sum()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER INPUT — written once per frame by the input plugin
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub ui_up: bool,
    pub ui_down: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
    pub pause: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// The pointer moved; `ray` is the cursor ray in world space.
#[derive(Event, Debug, Clone)]
pub struct PointerMoveEvent {
    pub ray: Ray3d,
}

/// The pointer was pressed; `ray` is the cursor ray in world space.
#[derive(Event, Debug, Clone)]
pub struct PointerDownEvent {
    pub ray: Ray3d,
}

/// One combined feedback signal per pointer-down that connected.
/// All candidate cells of the press have already been processed when
/// this fires; downstream sound/flash/pickaxe cues key off it.
#[derive(Event, Debug, Clone)]
pub struct SwingEvent {
    /// How many cells the press connected with (>= 1).
    pub candidates: usize,
    /// Whether any of them cracked through this press.
    pub cracked: bool,
    /// Averaged, bias-adjusted impact point.
    pub impact: Vec3,
}

/// A cell's health reached zero: its face broke and the cell deepened.
#[derive(Event, Debug, Clone)]
pub struct RockCrackedEvent {
    pub index: usize,
    /// The cell's excavation tier after the crack.
    pub depth: u32,
}

/// A gem was collected (fired once per crack, classified by RewardRule).
#[derive(Event, Debug, Clone)]
pub struct GemCollectedEvent {
    pub kind: GemKind,
}

/// Request to spawn a debris burst for a hit on `index`.
#[derive(Event, Debug, Clone)]
pub struct FragmentBurstEvent {
    pub index: usize,
    /// The cell's excavation tier at the moment of the hit.
    pub depth: u32,
    pub count: u8,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 1280.0;
pub const SCREEN_HEIGHT: f32 = 720.0;

/// Cells per grid side; the mine face is GRID_DIM × GRID_DIM.
pub const GRID_DIM: usize = 4;
pub const ROCK_COUNT: usize = GRID_DIM * GRID_DIM;

/// World-space spacing between adjacent rock centers.
pub const ROCK_SPACING: f32 = 1.6;
/// Radius of each rock's bounding sphere.
pub const ROCK_RADIUS: f32 = 1.5;
/// Hits required to crack through a rock face.
pub const ROCK_START_HEALTH: u8 = 3;

/// Acceptance bounds for a ray-rock intersection point.
pub const HIT_BOUND_X: f32 = 2.4;
pub const HIT_BOUND_Y: f32 = 2.6;
/// Cells whose sphere center has receded past this z are out of reach.
pub const HIT_MIN_CENTER_Z: f32 = -1.5;

/// Pickaxe action scalar decay, per second.
pub const PICKAXE_DECAY_RATE: f32 = 3.0;
/// Fragments live exactly this long (wall clock) before removal.
pub const FRAGMENT_LIFETIME_SECS: f32 = 0.5;
/// Impact flash shrink rate (scale units per second).
pub const FLASH_SHRINK_RATE: f32 = 6.0;
/// Rig scroll speed into the rock face, units per second.
pub const SCROLL_RATE: f32 = 1.0;
/// Tiling periods for the looping background segments.
pub const TUNNEL_PERIOD: f32 = 8.0;
pub const RAIL_TIE_PERIOD: f32 = 4.0;
