//! Game constants for arena size, colors, timing, and rendering layers.

use bevy::prelude::*;
use std::time::Duration;

use super::{Direction, Position};

// Arena dimensions
pub const ARENA_WIDTH: u32 = 32;
pub const ARENA_HEIGHT: u32 = 24;
pub const CELL_COUNT: usize = (ARENA_WIDTH * ARENA_HEIGHT) as usize;

// Visual settings
pub const CELL_SIZE: f32 = 25.0;
pub const CORNER_RADIUS: f32 = 4.0;

// Timing
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

// Initial snake
pub const INITIAL_LENGTH: usize = 3;
pub const INITIAL_HEAD: Position = Position {
    x: INITIAL_LENGTH as i32 - 1,
    y: ARENA_HEIGHT as i32 / 2,
};
pub const INITIAL_DIRECTION: Direction = Direction::Right;

// Colors
pub const SNAKE_HEAD_COLOR: Color = Color::srgba(0.0, 1.0, 0.0, 1.0);
pub const SNAKE_HEAD_GLOW_COLOR: Color = Color::srgba(0.0, 0.6, 0.0, 0.35);
pub const SNAKE_SEGMENT_COLOR: Color = Color::srgba(0.176, 0.706, 0.0, 1.0);
pub const SNAKE_EYE_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 1.0);
pub const APPLE_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 1.0);
pub const APPLE_FLASH_COLOR: Color = Color::srgba(1.0, 1.0, 0.3, 0.8);
pub const BACKGROUND_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 1.0);
pub const ARENA_COLOR: Color = Color::srgba(0.02, 0.02, 0.02, 1.0);
pub const GAME_OVER_COLOR: Color = Color::srgba(1.0, 0.0, 0.0, 1.0);

// Z-index constants for rendering layers
pub const Z_BACKGROUND: f32 = 0.0;
pub const Z_APPLE: f32 = 1.0;
pub const Z_SNAKE_SEGMENT: f32 = 1.5;
pub const Z_SNAKE_HEAD: f32 = 2.0;
