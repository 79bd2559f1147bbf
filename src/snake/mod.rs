//! Snake plugin - handles steering input and the fixed-interval game tick.

use bevy::{prelude::*, time::common_conditions::on_timer};

use crate::game::{
    AppleEaten, Direction, GameOver, GameState, InputBuffer, MoveTimer, SnakeMoved, TICK_INTERVAL,
    TickOutcome,
};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                snake_steering_input,
                snake_tick.run_if(on_timer(TICK_INTERVAL)),
            )
                .chain(),
        );
    }
}

/// System to read keyboard input and queue direction changes.
pub fn snake_steering_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut input_buffer: ResMut<InputBuffer>,
    game_state: Res<GameState>,
) {
    if !game_state.is_running() {
        return;
    }

    if let Some(direction) = Direction::from_input(&keyboard_input) {
        input_buffer.queue_direction(direction, game_state.direction());
    }
}

/// System to advance the game by one tick.
pub fn snake_tick(
    mut game_state: ResMut<GameState>,
    mut input_buffer: ResMut<InputBuffer>,
    mut move_timer: ResMut<MoveTimer>,
    mut moved_writer: MessageWriter<SnakeMoved>,
    mut apple_eaten_writer: MessageWriter<AppleEaten>,
    mut game_over_writer: MessageWriter<GameOver>,
) {
    if !game_state.is_running() {
        return;
    }

    if let Some(direction) = input_buffer.pop_direction()
        && !game_state.steer(direction)
    {
        debug!("ignored turn to {direction:?}");
    }

    let outcome = game_state.tick(&mut rand::rng());
    move_timer.elapsed = std::time::Duration::ZERO;

    match outcome {
        TickOutcome::Idle => {}
        TickOutcome::Moved => {
            moved_writer.write(SnakeMoved);
        }
        TickOutcome::AteApple { at } => {
            debug!(
                "apple eaten at ({}, {}), score {}",
                at.x,
                at.y,
                game_state.score()
            );
            moved_writer.write(SnakeMoved);
            apple_eaten_writer.write(AppleEaten { position: at });
        }
        TickOutcome::GameOver(cause) => {
            info!(
                "Game over ({cause:?})! Final score: {}",
                game_state.score()
            );
            // The head may already be off the board; leave the drawn snake
            // on its last cells instead of sliding it there.
            game_over_writer.write(GameOver {
                cause,
                score: game_state.score(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;

    use crate::game::{GameOverCause, Position};

    fn steering_app(state: GameState) -> App {
        let mut app = App::new();
        app.insert_resource(state)
            .init_resource::<InputBuffer>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(Update, snake_steering_input);
        app
    }

    fn tick_app(state: GameState) -> App {
        let mut app = App::new();
        app.insert_resource(state)
            .init_resource::<InputBuffer>()
            .init_resource::<MoveTimer>()
            .add_message::<SnakeMoved>()
            .add_message::<AppleEaten>()
            .add_message::<GameOver>()
            .add_systems(Update, snake_tick);
        app
    }

    fn straight_snake() -> GameState {
        GameState::with_layout(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 3, y: 5 },
            ],
            Direction::Right,
            Position { x: 20, y: 20 },
        )
    }

    #[test]
    fn arrow_key_queues_direction() {
        let mut app = steering_app(straight_snake());
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowUp);
        app.update();

        let buffer = app.world().resource::<InputBuffer>();
        assert_eq!(buffer.last_direction(), Some(Direction::Up));
    }

    #[test]
    fn reverse_key_is_not_queued() {
        let mut app = steering_app(straight_snake());
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::ArrowLeft);
        app.update();

        assert!(app.world().resource::<InputBuffer>().is_empty());
    }

    #[test]
    fn tick_applies_buffered_direction() {
        let mut app = tick_app(straight_snake());
        app.world_mut()
            .resource_mut::<InputBuffer>()
            .queue_direction(Direction::Up, Direction::Right);
        app.update();

        let state = app.world().resource::<GameState>();
        assert_eq!(state.direction(), Direction::Up);
        assert_eq!(state.head(), Position { x: 5, y: 6 });
        assert!(app.world().resource::<InputBuffer>().is_empty());
    }

    #[test]
    fn tick_into_wall_writes_game_over() {
        let state = GameState::with_layout(
            vec![Position { x: 0, y: 3 }, Position { x: 1, y: 3 }],
            Direction::Left,
            Position { x: 20, y: 20 },
        );
        let mut app = tick_app(state);
        app.update();

        assert!(!app.world().resource::<GameState>().is_running());
        let messages = app.world().resource::<Messages<GameOver>>();
        let mut cursor = messages.get_cursor();
        let written: Vec<&GameOver> = cursor.read(messages).collect();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].cause, GameOverCause::HitWall);
        assert_eq!(written[0].score, 0);
    }

    #[test]
    fn fatal_tick_does_not_move_the_drawn_snake() {
        let state = GameState::with_layout(
            vec![Position { x: 0, y: 3 }, Position { x: 1, y: 3 }],
            Direction::Left,
            Position { x: 20, y: 20 },
        );
        let mut app = tick_app(state);
        app.update();

        let head = app.world().resource::<GameState>().head();
        assert!(!head.in_bounds());
        assert!(app.world().resource::<Messages<SnakeMoved>>().is_empty());
    }

    #[test]
    fn ordinary_tick_moves_the_drawn_snake() {
        let mut app = tick_app(straight_snake());
        app.update();

        assert_eq!(app.world().resource::<Messages<SnakeMoved>>().len(), 1);
    }
}
