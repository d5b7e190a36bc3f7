mod shared;
mod input;
mod data;
mod mine;
mod rewards;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Mining Quest".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<GameConfig>()
        .init_resource::<MineStats>()
        // Events
        .add_event::<PointerMoveEvent>()
        .add_event::<PointerDownEvent>()
        .add_event::<SwingEvent>()
        .add_event::<RockCrackedEvent>()
        .add_event::<GemCollectedEvent>()
        .add_event::<FragmentBurstEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>()
        // Frame phases: animate, resolve input, observe
        .configure_sets(
            Update,
            (UpdateSet::Advance, UpdateSet::Resolve, UpdateSet::Observe).chain(),
        )
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins(mine::MinePlugin)
        .add_plugins(rewards::RewardsPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera and ambient
        .insert_resource(ClearColor(Color::srgb(0.03, 0.025, 0.02)))
        .insert_resource(AmbientLight {
            color: Color::srgb(1.0, 0.85, 0.6),
            brightness: 60.0,
        })
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 9.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
