//! Game resources (singleton state) besides the rules engine.

use bevy::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

use super::Direction;

/// Input buffer to queue direction changes between ticks.
#[derive(Resource, Default, Debug)]
pub struct InputBuffer {
    queued_directions: VecDeque<Direction>,
}

impl InputBuffer {
    const CAPACITY: usize = 2;

    /// Queue a direction change relative to `current`, the direction the
    /// snake will have once everything already queued is applied.
    ///
    /// Repeats and reversals are dropped, as is anything past the capacity.
    /// Returns whether the direction was queued.
    pub fn queue_direction(&mut self, direction: Direction, current: Direction) -> bool {
        let last = self.last_direction().unwrap_or(current);
        if direction == last || direction == last.opposite() {
            return false;
        }
        if self.queued_directions.len() >= Self::CAPACITY {
            return false;
        }
        self.queued_directions.push_back(direction);
        true
    }

    /// Pop the next queued direction.
    pub fn pop_direction(&mut self) -> Option<Direction> {
        self.queued_directions.pop_front()
    }

    /// Get the last queued direction without removing it.
    pub fn last_direction(&self) -> Option<Direction> {
        self.queued_directions.back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.queued_directions.is_empty()
    }

    /// Clear all queued directions.
    pub fn clear(&mut self) {
        self.queued_directions.clear();
    }
}

/// Resource to track time since last move for interpolation.
#[derive(Resource, Default)]
pub struct MoveTimer {
    pub elapsed: Duration,
}

/// Resource for camera shake effect.
#[derive(Resource)]
pub struct CameraShake {
    pub timer: Timer,
    pub intensity: f32,
}

impl Default for CameraShake {
    fn default() -> Self {
        CameraShake {
            timer: Timer::from_seconds(0.0, TimerMode::Once),
            intensity: 0.0,
        }
    }
}
