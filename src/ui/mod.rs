//! UI plugin - handles the camera, arena, score display, game over screen,
//! and restarting.

use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;
use std::time::Duration;

use crate::game::{
    ARENA_COLOR, ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE, GAME_OVER_COLOR, GameOver, GameOverUI,
    GameRestarted, GameState, InputBuffer, MoveTimer, ScoreText, Z_BACKGROUND,
};
use crate::snake::snake_tick;

/// Plugin for UI and game flow systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_system).add_systems(
            Update,
            (
                restart_game,
                update_score_text,
                spawn_game_over_screen_system,
            )
                .chain()
                .after(snake_tick),
        );
    }
}

/// Initial setup system - camera, arena, score text.
fn setup_system(mut commands: Commands) {
    // Camera with HDR and bloom so the snake and apple glow
    commands.spawn((
        Camera2d,
        Hdr,
        Bloom {
            intensity: 0.3,
            low_frequency_boost: 0.6,
            low_frequency_boost_curvature: 0.5,
            high_pass_frequency: 0.8,
            ..default()
        },
    ));

    commands.spawn((
        Sprite {
            color: ARENA_COLOR,
            custom_size: Some(Vec2::new(
                ARENA_WIDTH as f32 * CELL_SIZE,
                ARENA_HEIGHT as f32 * CELL_SIZE,
            )),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, Z_BACKGROUND),
    ));

    commands.spawn((
        Text::from("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        ScoreText,
    ));
}

/// Spawns the game over screen UI.
fn spawn_game_over_screen(commands: &mut Commands, score: usize) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            GameOverUI,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::from("GAME OVER"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(GAME_OVER_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from(format!("Score: {score}")),
                TextFont {
                    font_size: 40.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::from("Press SPACE to play again"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// System to spawn the game over screen when the game ends.
fn spawn_game_over_screen_system(
    mut commands: Commands,
    game_state: Res<GameState>,
    mut game_over_reader: MessageReader<GameOver>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    let Some(game_over) = game_over_reader.read().last() else {
        return;
    };

    // A game over read after a restart in the same frame is stale.
    if game_state.is_running() {
        return;
    }

    if game_over_ui.is_empty() {
        spawn_game_over_screen(&mut commands, game_over.score);
    }
}

/// System to start a new game from the game over screen.
pub fn restart_game(
    mut commands: Commands,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut game_state: ResMut<GameState>,
    mut input_buffer: ResMut<InputBuffer>,
    mut move_timer: ResMut<MoveTimer>,
    mut restarted_writer: MessageWriter<GameRestarted>,
    game_over_ui: Query<Entity, With<GameOverUI>>,
) {
    if game_state.is_running() || !keyboard_input.just_pressed(KeyCode::Space) {
        return;
    }

    for entity in game_over_ui.iter() {
        commands.entity(entity).despawn();
    }

    game_state.reset(&mut rand::rng());
    input_buffer.clear();
    move_timer.elapsed = Duration::ZERO;
    restarted_writer.write(GameRestarted);

    info!("New game started");
}

/// System to update the score display.
fn update_score_text(game_state: Res<GameState>, mut query: Query<&mut Text, With<ScoreText>>) {
    if !game_state.is_changed() {
        return;
    }

    if let Ok(mut text) = query.single_mut() {
        *text = Text::from(format!("Score: {}", game_state.score()));
    }
}
