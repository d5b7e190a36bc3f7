//! Data layer — resolves game configuration at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), builds the
//! `GameConfig` (embedded RON defaults, optionally overridden by a
//! `assets/config/game.ron` next to the executable on native targets),
//! then transitions the game into GameState::MainMenu.
//!
//! A malformed override is never fatal: it logs a warning and the
//! defaults stand.

use bevy::prelude::*;
use crate::shared::*;

/// Embedded defaults, in the same RON shape the override file uses.
const DEFAULT_CONFIG_RON: &str = r#"(
    reward_rule: Parity,
    music_enabled: true,
    sfx_enabled: true,
)"#;

/// Relative path of the optional native-target override file.
const CONFIG_OVERRIDE_PATH: &str = "assets/config/game.ron";

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_config);
    }
}

/// Parse a config out of RON text.
pub fn parse_config(text: &str) -> Result<GameConfig, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Resolve the effective config from the embedded default and an
/// optional override body.
pub fn resolve_config(override_text: Option<&str>) -> GameConfig {
    let mut config = match parse_config(DEFAULT_CONFIG_RON) {
        Ok(config) => config,
        Err(err) => {
            warn!("embedded config failed to parse ({err}); using built-in defaults");
            GameConfig::default()
        }
    };

    if let Some(text) = override_text {
        match parse_config(text) {
            Ok(overridden) => config = overridden,
            Err(err) => {
                warn!("config override ignored: {err}");
            }
        }
    }

    config
}

/// Single system that resolves the config and then transitions to MainMenu.
fn load_config(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    #[cfg(not(target_arch = "wasm32"))]
    let override_text = std::fs::read_to_string(CONFIG_OVERRIDE_PATH).ok();
    #[cfg(target_arch = "wasm32")]
    let override_text: Option<String> = None;

    let config = resolve_config(override_text.as_deref());
    info!(
        "DataPlugin: config resolved (reward rule {:?}, music {}, sfx {})",
        config.reward_rule, config.music_enabled, config.sfx_enabled
    );
    commands.insert_resource(config);

    next_state.set(GameState::MainMenu);
}
