use bevy::app::AppExit;
use bevy::prelude::*;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct MainMenuItemText {
    pub index: usize,
}

/// Tracks main menu selection
#[derive(Resource)]
pub struct MainMenuState {
    pub cursor: usize,
}

const MAIN_MENU_OPTIONS: &[&str] = &["Play", "Quit"];

const ITEM_COLOR: Color = Color::srgb(0.75, 0.72, 0.62);
const ITEM_SELECTED_COLOR: Color = Color::srgb(1.0, 0.95, 0.55);

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_main_menu(mut commands: Commands) {
    commands.insert_resource(MainMenuState { cursor: 0 });

    commands
        .spawn((
            MainMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(30.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.09, 0.07, 0.06)),
        ))
        .with_children(|parent| {
            // Game title
            parent.spawn((
                Text::new("MINING QUEST"),
                TextFont {
                    font_size: 52.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.45)),
            ));

            // Subtitle
            parent.spawn((
                Text::new("Swing the pickaxe. Crack the rock. Keep the gems."),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.65, 0.55)),
            ));

            // Menu options
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(10.0),
                    ..default()
                })
                .with_children(|menu| {
                    for (i, label) in MAIN_MENU_OPTIONS.iter().enumerate() {
                        menu.spawn((
                            MainMenuItemText { index: i },
                            Text::new(*label),
                            TextFont {
                                font_size: 26.0,
                                ..default()
                            },
                            TextColor(ITEM_COLOR),
                        ));
                    }
                });

            parent.spawn((
                Text::new("Up/Down: Select | Enter: Confirm"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.47, 0.4)),
            ));
        });
}

pub fn despawn_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<MainMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE / INTERACTION
// ═══════════════════════════════════════════════════════════════════════

pub fn update_main_menu_visuals(
    state: Option<Res<MainMenuState>>,
    mut items: Query<(&MainMenuItemText, &mut TextColor)>,
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

pub fn main_menu_navigation(
    state: Option<ResMut<MainMenuState>>,
    input: Res<PlayerInput>,
    mut next_state: ResMut<NextState<GameState>>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
    mut exit_events: EventWriter<AppExit>,
) {
    let Some(mut state) = state else { return };
    let count = MAIN_MENU_OPTIONS.len();

    if input.ui_up {
        state.cursor = (state.cursor + count - 1) % count;
        sfx_events.send(PlaySfxEvent {
            sfx_id: "menu_move".to_string(),
        });
    }
    if input.ui_down {
        state.cursor = (state.cursor + 1) % count;
        sfx_events.send(PlaySfxEvent {
            sfx_id: "menu_move".to_string(),
        });
    }

    if input.ui_confirm {
        sfx_events.send(PlaySfxEvent {
            sfx_id: "menu_select".to_string(),
        });
        match state.cursor {
            0 => next_state.set(GameState::Playing),
            _ => {
                exit_events.send(AppExit::Success);
            }
        }
    }
}
