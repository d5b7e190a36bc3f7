use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MUSIC STATE — tracks the currently playing music entity
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// SFX PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Maps SFX IDs (sent by other domains) to actual audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "pickaxe-light1" => Some("audio/pickaxe-light1.ogg"),
        "pickaxe-light2" => Some("audio/pickaxe-light2.ogg"),
        "pickaxe-light3" => Some("audio/pickaxe-light3.ogg"),
        "pickaxe-light4" => Some("audio/pickaxe-light4.ogg"),
        "pickaxe-medium1" => Some("audio/pickaxe-medium1.ogg"),
        "pickaxe-medium2" => Some("audio/pickaxe-medium2.ogg"),
        "pickaxe-medium3" => Some("audio/pickaxe-medium3.ogg"),
        "pickaxe-medium4" => Some("audio/pickaxe-medium4.ogg"),
        "pickaxe-medium5" => Some("audio/pickaxe-medium5.ogg"),
        "pickaxe-medium6" => Some("audio/pickaxe-medium6.ogg"),
        "pickaxe-heavy1" => Some("audio/pickaxe-heavy1.ogg"),
        "pickaxe-heavy2" => Some("audio/pickaxe-heavy2.ogg"),
        "gem-shine" => Some("audio/gem-shine.ogg"),
        "menu_move" => Some("audio/menu-move.ogg"),
        "menu_select" => Some("audio/menu-select.ogg"),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MUSIC PATH MAPPING
// ═══════════════════════════════════════════════════════════════════════

/// Maps music track IDs to actual audio file paths.
fn music_path(track_id: &str) -> Option<&'static str> {
    match track_id {
        "mine" => Some("audio/music/mine-loop.ogg"),
        "menu" => Some("audio/music/menu-loop.ogg"),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SWING FEEDBACK TIER SELECTION
// ═══════════════════════════════════════════════════════════════════════

/// Pick the one sound for a swing. A crack always lands the heavy tier;
/// otherwise a clean single-cell tap is light and a multi-cell glance is
/// medium. `roll` is a uniform draw in [0, 1) selecting within the tier.
pub fn swing_sfx_id(candidates: usize, cracked: bool, roll: f32) -> String {
    if cracked {
        format!("pickaxe-heavy{}", (roll * 2.0) as u32 + 1)
    } else if candidates == 1 {
        format!("pickaxe-light{}", (roll * 4.0) as u32 + 1)
    } else {
        format!("pickaxe-medium{}", (roll * 6.0) as u32 + 1)
    }
}

/// System: one feedback sound per connecting swing.
pub fn play_swing_feedback(
    mut swing_events: EventReader<SwingEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    let mut rng = rand::thread_rng();
    for event in swing_events.read() {
        sfx_events.send(PlaySfxEvent {
            sfx_id: swing_sfx_id(event.candidates, event.cracked, rng.gen_range(0.0..1.0)),
        });
    }
}

/// System: chime once per collected gem.
pub fn play_gem_chime(
    mut gem_events: EventReader<GemCollectedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for _ev in gem_events.read() {
        sfx_events.send(PlaySfxEvent {
            sfx_id: "gem-shine".to_string(),
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Listen for PlaySfxEvent and spawn one-shot audio sources that auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    for event in events.read() {
        if !config.sfx_enabled {
            continue;
        }
        if let Some(path) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(asset_server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}

/// Listen for PlayMusicEvent, stop the current music track, and start a new one.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        // Stop current track if playing
        if let Some(entity) = music_state.current_track {
            commands.entity(entity).despawn_recursive();
        }

        if config.music_enabled {
            if let Some(path) = music_path(&event.track_id) {
                let entity = commands
                    .spawn((
                        AudioPlayer::new(asset_server.load(path)),
                        PlaybackSettings::LOOP,
                    ))
                    .id();
                music_state.current_track = Some(entity);
                music_state.current_track_id = event.track_id.clone();
                continue;
            }
        }
        music_state.current_track = None;
        music_state.current_track_id.clear();
    }
}

/// Start the mine loop when entering the Playing state.
pub fn start_mine_music(
    mut music_events: EventWriter<PlayMusicEvent>,
    music_state: Res<MusicState>,
) {
    if music_state.current_track_id != "mine" {
        music_events.send(PlayMusicEvent {
            track_id: "mine".to_string(),
        });
    }
}

/// Start the menu loop when entering the main menu.
pub fn start_menu_music(
    mut music_events: EventWriter<PlayMusicEvent>,
    music_state: Res<MusicState>,
) {
    if music_state.current_track_id != "menu" {
        music_events.send(PlayMusicEvent {
            track_id: "menu".to_string(),
        });
    }
}
