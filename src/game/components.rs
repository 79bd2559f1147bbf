//! ECS components and the grid primitives shared by every plugin.

use bevy::prelude::*;

use super::{ARENA_HEIGHT, ARENA_WIDTH, CELL_SIZE};

/// Grid cell on the arena. `y` grows upwards.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// The neighbouring cell one step in `direction`.
    pub fn step(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0..ARENA_WIDTH as i32).contains(&self.x) && (0..ARENA_HEIGHT as i32).contains(&self.y)
    }

    /// Centre of the cell in world space, with the arena centred on the origin.
    pub fn to_world(&self) -> Vec2 {
        Vec2::new(
            (self.x as f32 - ARENA_WIDTH as f32 / 2.0 + 0.5) * CELL_SIZE,
            (self.y as f32 - ARENA_HEIGHT as f32 / 2.0 + 0.5) * CELL_SIZE,
        )
    }
}

/// Component to track previous position for smooth interpolation.
#[derive(Component, Clone, Copy, Debug)]
pub struct PreviousPosition {
    pub pos: Position,
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    /// Rotation around z that turns a right-facing sprite to face this way.
    pub fn angle(&self) -> f32 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => std::f32::consts::FRAC_PI_2,
            Direction::Left => std::f32::consts::PI,
            Direction::Down => -std::f32::consts::FRAC_PI_2,
        }
    }

    /// Direction of the key pressed this frame, if any. Arrow keys and WASD.
    pub fn from_input(keyboard_input: &ButtonInput<KeyCode>) -> Option<Direction> {
        if keyboard_input.just_pressed(KeyCode::ArrowLeft)
            || keyboard_input.just_pressed(KeyCode::KeyA)
        {
            Some(Direction::Left)
        } else if keyboard_input.just_pressed(KeyCode::ArrowRight)
            || keyboard_input.just_pressed(KeyCode::KeyD)
        {
            Some(Direction::Right)
        } else if keyboard_input.just_pressed(KeyCode::ArrowUp)
            || keyboard_input.just_pressed(KeyCode::KeyW)
        {
            Some(Direction::Up)
        } else if keyboard_input.just_pressed(KeyCode::ArrowDown)
            || keyboard_input.just_pressed(KeyCode::KeyS)
        {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// Marks the segment entity drawn at the head of the body.
#[derive(Component)]
pub struct SnakeHead;

/// Component to mark snake head eyes (children of head).
#[derive(Component)]
pub struct SnakeEye;

/// Body segment entity; `index` points into `GameState::body()`.
#[derive(Component)]
pub struct SnakeSegment {
    pub index: usize,
}

/// Marks the apple entity.
#[derive(Component)]
pub struct Apple;

/// Component for apple pulsing animation.
#[derive(Component)]
pub struct ApplePulse {
    pub timer: Timer,
}

/// Component for entities that should flash/pulse once and disappear.
#[derive(Component)]
pub struct PulseEffect {
    pub timer: Timer,
    pub start_scale: f32,
    pub end_scale: f32,
}

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;
