use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();
        app.add_systems(PreUpdate, (read_menu_input, emit_pointer_rays).chain());
    }
}

/// The single point where hardware input becomes game actions.
fn read_menu_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    input.ui_up = keys.just_pressed(KeyCode::ArrowUp) || keys.just_pressed(KeyCode::KeyW);
    input.ui_down = keys.just_pressed(KeyCode::ArrowDown) || keys.just_pressed(KeyCode::KeyS);
    input.ui_confirm =
        keys.just_pressed(KeyCode::Enter) || keys.just_pressed(KeyCode::Space);
    input.ui_cancel = keys.just_pressed(KeyCode::Escape);
    input.pause = keys.just_pressed(KeyCode::Escape);
}

/// Converts the cursor position into a world-space ray and emits pointer
/// events. Downstream domains never touch windows or cameras directly.
fn emit_pointer_rays(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut move_events: EventWriter<PointerMoveEvent>,
    mut down_events: EventWriter<PointerDownEvent>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    if cursor_moved.read().next().is_some() {
        move_events.send(PointerMoveEvent { ray });
    }
    if mouse.just_pressed(MouseButton::Left) {
        down_events.send(PointerDownEvent { ray });
    }
}
