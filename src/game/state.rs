//! Rules engine: the snake body, the apple, and what happens on each tick.
//!
//! Nothing here touches entities, so the rules can be driven directly from
//! tests with a seeded RNG. Plugins read the state to draw it and call
//! [`GameState::tick`] from the timer system.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::{
    ARENA_HEIGHT, ARENA_WIDTH, CELL_COUNT, Direction, INITIAL_DIRECTION, INITIAL_HEAD,
    INITIAL_LENGTH, Position,
};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverCause {
    HitWall,
    HitSelf,
    /// The snake covers every cell, so there is nowhere left for an apple.
    BoardFilled,
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is over; nothing moved.
    Idle,
    Moved,
    AteApple { at: Position },
    GameOver(GameOverCause),
}

/// Main game state resource.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    /// Head first. Never empty.
    body: Vec<Position>,
    apple: Position,
    direction: Direction,
    running: bool,
    score: usize,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new(&mut rand::rng())
    }
}

impl GameState {
    /// A fresh running game in the initial layout.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut state = GameState {
            body: Vec::with_capacity(CELL_COUNT),
            apple: INITIAL_HEAD,
            direction: INITIAL_DIRECTION,
            running: true,
            score: 0,
        };
        state.reset(rng);
        state
    }

    /// A running game with an explicit layout, head first.
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn with_layout(body: Vec<Position>, direction: Direction, apple: Position) -> Self {
        assert!(!body.is_empty(), "snake body needs at least a head");
        let mut buffer = Vec::with_capacity(CELL_COUNT.max(body.len()));
        buffer.extend(body);
        GameState {
            body: buffer,
            apple,
            direction,
            running: true,
            score: 0,
        }
    }

    /// Start over: initial length, score and direction, and a fresh apple.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.body.clear();
        self.body.extend((0..INITIAL_LENGTH as i32).map(|i| Position {
            x: INITIAL_HEAD.x - i,
            y: INITIAL_HEAD.y,
        }));
        self.direction = INITIAL_DIRECTION;
        self.score = 0;
        self.running = true;
        // The initial layout never fills the arena.
        if let Some(cell) = random_free_cell(&self.body, rng) {
            self.apple = cell;
        }
    }

    /// Turn the snake. Reversing, or turning straight back onto the segment
    /// behind the head, is refused and leaves the direction unchanged.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        if self.body.get(1) == Some(&self.head().step(direction)) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance the game by one tick.
    pub fn tick(&mut self, rng: &mut impl Rng) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }

        let vacated = self.advance();
        let mut outcome = TickOutcome::Moved;

        if self.head() == self.apple {
            let eaten = self.apple;
            self.body.push(vacated);
            self.score += 1;
            outcome = TickOutcome::AteApple { at: eaten };

            match random_free_cell(&self.body, rng) {
                Some(cell) => self.apple = cell,
                None => return self.end(GameOverCause::BoardFilled),
            }
        }

        if let Some(cause) = self.collision() {
            return self.end(cause);
        }

        outcome
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn apple(&self) -> Position {
        self.apple
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Shift each segment onto its predecessor and step the head.
    /// Returns the cell the tail left behind.
    fn advance(&mut self) -> Position {
        let len = self.body.len();
        let vacated = self.body[len - 1];
        self.body.copy_within(..len - 1, 1);
        self.body[0] = self.body[0].step(self.direction);
        vacated
    }

    fn collision(&self) -> Option<GameOverCause> {
        let head = self.head();
        if !head.in_bounds() {
            Some(GameOverCause::HitWall)
        } else if self.body[1..].contains(&head) {
            Some(GameOverCause::HitSelf)
        } else {
            None
        }
    }

    fn end(&mut self, cause: GameOverCause) -> TickOutcome {
        self.running = false;
        TickOutcome::GameOver(cause)
    }
}

/// Picks a cell not covered by `occupied`, uniformly at random.
pub fn random_free_cell(occupied: &[Position], rng: &mut impl Rng) -> Option<Position> {
    let free: Vec<Position> = (0..ARENA_HEIGHT as i32)
        .flat_map(|y| (0..ARENA_WIDTH as i32).map(move |x| Position { x, y }))
        .filter(|cell| !occupied.contains(cell))
        .collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    #[test]
    fn new_game_starts_in_initial_layout() {
        let state = GameState::new(&mut StdRng::seed_from_u64(7));
        assert_eq!(state.body(), &[pos(2, 12), pos(1, 12), pos(0, 12)]);
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.score(), 0);
        assert!(state.is_running());
        assert!(!state.body().contains(&state.apple()));
    }

    #[test]
    fn tick_shifts_segments_towards_head() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = GameState::with_layout(
            vec![pos(5, 5), pos(4, 5), pos(3, 5)],
            Direction::Right,
            pos(20, 20),
        );

        assert_eq!(state.tick(&mut rng), TickOutcome::Moved);
        assert_eq!(state.body(), &[pos(6, 5), pos(5, 5), pos(4, 5)]);

        assert!(state.steer(Direction::Up));
        state.tick(&mut rng);
        assert_eq!(state.body(), &[pos(6, 6), pos(6, 5), pos(5, 5)]);
    }

    #[test]
    fn steer_refuses_reverse() {
        let mut state = GameState::with_layout(
            vec![pos(5, 5), pos(4, 5), pos(3, 5)],
            Direction::Right,
            pos(20, 20),
        );
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.direction(), Direction::Right);
    }

    #[test]
    fn steer_refuses_turning_onto_neck() {
        // Steering Up then Left between two ticks would fold the head back
        // onto the segment behind it.
        let mut state = GameState::with_layout(
            vec![pos(5, 5), pos(4, 5), pos(3, 5)],
            Direction::Right,
            pos(20, 20),
        );
        assert!(state.steer(Direction::Up));
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.direction(), Direction::Up);
    }

    #[test]
    fn moving_into_vacated_tail_cell_is_safe() {
        let mut rng = StdRng::seed_from_u64(3);
        // A 2x2 loop: the head chases the tail into the cell it leaves.
        let mut state = GameState::with_layout(
            vec![pos(5, 6), pos(6, 6), pos(6, 5), pos(5, 5)],
            Direction::Down,
            pos(20, 20),
        );
        assert_eq!(state.tick(&mut rng), TickOutcome::Moved);
        assert!(state.is_running());
        assert_eq!(state.head(), pos(5, 5));
    }

    #[test]
    fn growth_keeps_the_vacated_tail_cell() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut state = GameState::with_layout(
            vec![pos(5, 5), pos(4, 5), pos(3, 5)],
            Direction::Right,
            pos(6, 5),
        );
        assert_eq!(
            state.tick(&mut rng),
            TickOutcome::AteApple { at: pos(6, 5) }
        );
        assert_eq!(state.body(), &[pos(6, 5), pos(5, 5), pos(4, 5), pos(3, 5)]);
        assert!(!state.body().contains(&state.apple()));
    }

    #[test]
    fn tick_after_game_over_changes_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state =
            GameState::with_layout(vec![pos(0, 0), pos(1, 0)], Direction::Left, pos(20, 20));
        assert_eq!(
            state.tick(&mut rng),
            TickOutcome::GameOver(GameOverCause::HitWall)
        );

        let frozen = state.body().to_vec();
        assert_eq!(state.tick(&mut rng), TickOutcome::Idle);
        assert_eq!(state.body(), frozen.as_slice());
    }

    #[test]
    fn free_cell_is_none_on_full_board() {
        let mut rng = StdRng::seed_from_u64(6);
        let every_cell: Vec<Position> = (0..ARENA_HEIGHT as i32)
            .flat_map(|y| (0..ARENA_WIDTH as i32).map(move |x| pos(x, y)))
            .collect();
        assert_eq!(random_free_cell(&every_cell, &mut rng), None);

        let last_gap = &every_cell[1..];
        assert_eq!(random_free_cell(last_gap, &mut rng), Some(pos(0, 0)));
    }

    #[test]
    fn eating_the_last_free_cell_fills_the_board() {
        let mut rng = StdRng::seed_from_u64(8);
        // Serpentine walk over the whole arena starting at (0, 0). Dropping
        // that first cell leaves the head at (1, 0) with the apple to its left.
        let serpentine: Vec<Position> = (0..ARENA_HEIGHT as i32)
            .flat_map(|y| {
                let row: Vec<Position> = (0..ARENA_WIDTH as i32).map(|x| pos(x, y)).collect();
                if y % 2 == 0 {
                    row
                } else {
                    row.into_iter().rev().collect()
                }
            })
            .collect();
        let body = serpentine[1..].to_vec();
        let mut state = GameState::with_layout(body, Direction::Left, pos(0, 0));

        assert_eq!(
            state.tick(&mut rng),
            TickOutcome::GameOver(GameOverCause::BoardFilled)
        );
        assert_eq!(state.body().len(), CELL_COUNT);
        assert_eq!(state.score(), 1);
    }
}
