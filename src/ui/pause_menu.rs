use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct PauseMenuRoot;

#[derive(Component)]
pub struct PauseMenuItemText {
    pub index: usize,
}

/// Tracks pause menu selection
#[derive(Resource)]
pub struct PauseMenuState {
    pub cursor: usize,
}

const PAUSE_OPTIONS: &[&str] = &["Resume", "Quit to Menu"];

const ITEM_COLOR: Color = Color::srgb(0.75, 0.72, 0.62);
const ITEM_SELECTED_COLOR: Color = Color::srgb(1.0, 0.95, 0.55);

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_pause_menu(mut commands: Commands) {
    commands.insert_resource(PauseMenuState { cursor: 0 });

    commands
        .spawn((
            PauseMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("PAUSED"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.5)),
            ));

            for (i, label) in PAUSE_OPTIONS.iter().enumerate() {
                parent.spawn((
                    PauseMenuItemText { index: i },
                    Text::new(*label),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(ITEM_COLOR),
                ));
            }

            parent.spawn((
                Text::new("Up/Down: Select | Enter: Confirm | Esc: Resume"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.47, 0.4)),
            ));
        });
}

pub fn despawn_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<PauseMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE / INTERACTION
// ═══════════════════════════════════════════════════════════════════════

pub fn update_pause_menu_visuals(
    state: Option<Res<PauseMenuState>>,
    mut items: Query<(&PauseMenuItemText, &mut TextColor)>,
) {
    let Some(state) = state else { return };
    for (item, mut color) in items.iter_mut() {
        color.0 = if item.index == state.cursor {
            ITEM_SELECTED_COLOR
        } else {
            ITEM_COLOR
        };
    }
}

pub fn pause_menu_navigation(
    state: Option<ResMut<PauseMenuState>>,
    input: Res<PlayerInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut state) = state else { return };
    let count = PAUSE_OPTIONS.len();

    if input.ui_up {
        state.cursor = (state.cursor + count - 1) % count;
    }
    if input.ui_down {
        state.cursor = (state.cursor + 1) % count;
    }

    if input.ui_cancel {
        next_state.set(GameState::Playing);
        return;
    }

    if input.ui_confirm {
        match state.cursor {
            0 => next_state.set(GameState::Playing),
            _ => next_state.set(GameState::MainMenu),
        }
    }
}

/// System: Escape opens the pause overlay while playing.
pub fn pause_on_escape(input: Res<PlayerInput>, mut next_state: ResMut<NextState<GameState>>) {
    if input.pause {
        next_state.set(GameState::Paused);
    }
}
