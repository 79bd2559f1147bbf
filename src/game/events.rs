//! Game events (messages).

use bevy::prelude::*;

use super::{GameOverCause, Position};

/// Written after every tick that moved the snake.
#[derive(Message)]
pub struct SnakeMoved;

/// Message triggered when an apple is eaten (for visual effects).
#[derive(Message)]
pub struct AppleEaten {
    pub position: Position,
}

/// Message triggered when the running game ends.
#[derive(Message)]
pub struct GameOver {
    pub cause: GameOverCause,
    pub score: usize,
}

/// Message triggered when a new game starts from the game over screen.
#[derive(Message)]
pub struct GameRestarted;
