use std::time::Duration;

use super::action::Direction;
use super::effects::{PowerUpItem, PowerUpKind};
use super::food::Food;
use super::grid::Position;
use super::mode::GameMode;

/// The snake on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current committed direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        debug_assert!(!self.body.is_empty());
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Prepend a new head segment. The tail is dropped separately, only on
    /// moves where nothing was consumed.
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    /// Remove the tail segment
    pub fn drop_tail(&mut self) {
        self.body.pop();
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No run active; waiting for a start
    Idle,
    /// The loop is advancing the simulation
    Running,
    /// A terminal transition fired; entities are frozen for inspection
    GameOver,
}

/// Remaining lifetime of one active effect, as published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectStatus {
    pub kind: PowerUpKind,
    pub remaining: Duration,
    pub duration: Duration,
}

/// Read-only view of the run state, published once per tick.
///
/// Observers (renderer, audio, persistence) consume this and never reach
/// back into the loop's mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub phase: Phase,
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Food,
    pub power_up: Option<PowerUpItem>,
    pub active_effects: Vec<EffectStatus>,
    pub score: u32,
    pub apples: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub time_remaining: Option<Duration>,
    pub current_interval: Duration,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
