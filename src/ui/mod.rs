pub mod audio;
pub mod main_menu;
pub mod pause_menu;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<audio::MusicState>();

        // ─── AUDIO — event listeners run in every state ───
        app.add_systems(
            Update,
            (
                (audio::play_swing_feedback, audio::play_gem_chime),
                (audio::handle_play_sfx, audio::handle_play_music),
            )
                .chain()
                .in_set(UpdateSet::Observe),
        );
        app.add_systems(OnEnter(GameState::Playing), audio::start_mine_music);
        app.add_systems(OnEnter(GameState::MainMenu), audio::start_menu_music);

        // ─── MAIN MENU ───
        app.add_systems(OnEnter(GameState::MainMenu), main_menu::spawn_main_menu);
        app.add_systems(OnExit(GameState::MainMenu), main_menu::despawn_main_menu);
        app.add_systems(
            Update,
            (
                main_menu::main_menu_navigation,
                main_menu::update_main_menu_visuals,
            )
                .chain()
                .run_if(in_state(GameState::MainMenu)),
        );

        // ─── PAUSE MENU ───
        app.add_systems(
            Update,
            pause_menu::pause_on_escape.run_if(in_state(GameState::Playing)),
        );
        app.add_systems(OnEnter(GameState::Paused), pause_menu::spawn_pause_menu);
        app.add_systems(OnExit(GameState::Paused), pause_menu::despawn_pause_menu);
        app.add_systems(
            Update,
            (
                pause_menu::pause_menu_navigation,
                pause_menu::update_pause_menu_visuals,
            )
                .chain()
                .run_if(in_state(GameState::Paused)),
        );
    }
}
