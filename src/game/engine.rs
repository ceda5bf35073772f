use std::time::{Duration, Instant};

use rand::rngs::ThreadRng;

use super::action::{Direction, DirectionQueue};
use super::effects::{EffectSet, PowerUpItem, PowerUpKind};
use super::food::{Food, FruitKind};
use super::grid::{random_free_cell, Position, GRID_SIZE};
use super::mode::GameMode;
use super::state::{EffectStatus, GameSnapshot, Phase, Snake};

/// Segments the snake starts a run with
const INITIAL_SNAKE_LENGTH: usize = 3;

/// Eating again within this window extends the combo
const COMBO_WINDOW: Duration = Duration::from_millis(3000);

/// Manhattan distance within which an active magnet picks items up
const MAGNET_RANGE: i32 = 3;

/// Something the run did this tick that collaborators may react to:
/// sound cues, haptics, and the profile store all key off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FoodEaten {
        points: u32,
        combo: u32,
        kind: FruitKind,
    },
    PowerUpCollected(PowerUpKind),
    ComboAdvanced {
        combo: u32,
    },
    GameOver {
        score: u32,
        apples: u32,
    },
}

/// The game loop and the authoritative run state it owns.
///
/// The host drives [`tick`](Self::tick) once per rendered frame; movement is
/// paced internally by the elapsed-time threshold, so the visual frame rate
/// and the logical move rate stay decoupled. Observers consume
/// [`snapshot`](Self::snapshot) and the events returned from `tick`; nothing
/// outside this struct mutates run state.
pub struct Game {
    mode: GameMode,
    phase: Phase,
    snake: Snake,
    queue: DirectionQueue,
    food: Food,
    power_up: Option<PowerUpItem>,
    effects: EffectSet,
    score: u32,
    apples: u32,
    combo: u32,
    max_combo: u32,
    score_multiplier: u32,
    base_interval: Duration,
    time_left: Option<Duration>,
    last_food_at: Option<Instant>,
    last_tick_at: Option<Instant>,
    last_move_at: Option<Instant>,
    rng: ThreadRng,
}

impl Game {
    /// Create an idle game configured for `mode`
    pub fn new(mode: GameMode) -> Self {
        let mut rng = rand::thread_rng();

        let snake = Snake::new(
            Position::new(GRID_SIZE / 2, GRID_SIZE / 2),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        );
        let food_cell = random_free_cell(&mut rng, &snake.body);
        let food = Food::new(food_cell, FruitKind::random(&mut rng));

        Self {
            mode,
            phase: Phase::Idle,
            snake,
            queue: DirectionQueue::new(),
            food,
            power_up: None,
            effects: EffectSet::new(),
            score: 0,
            apples: 0,
            combo: 1,
            max_combo: 1,
            score_multiplier: 1,
            base_interval: mode.initial_interval(),
            time_left: mode.time_limit(),
            last_food_at: None,
            last_tick_at: None,
            last_move_at: None,
            rng,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Reset all entities and begin a new run in `mode`
    pub fn start(&mut self, mode: GameMode, now: Instant) {
        self.mode = mode;
        self.apply_initial_layout();
        self.phase = Phase::Running;
        self.last_tick_at = Some(now);
        self.last_move_at = Some(now);
    }

    /// Halt the run and return to the idle state without starting a new one.
    /// On an already-idle core this is a no-op.
    pub fn reset(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.apply_initial_layout();
        self.phase = Phase::Idle;
        self.last_tick_at = None;
        self.last_move_at = None;
    }

    /// Buffer a direction change for the next committed moves.
    /// Silently rejected while no run is active, and subject to the
    /// reversal/duplicate/bound rules of [`DirectionQueue`].
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.queue.push(self.snake.direction, direction)
    }

    /// Re-base the elapsed-time references after the host stopped ticking
    /// (pause). The paused span is added to every pending deadline so it is
    /// not interpreted as missed moves, lapsed effects, or a blown combo
    /// window.
    pub fn resync(&mut self, now: Instant) {
        let Some(last_tick) = self.last_tick_at else {
            return;
        };
        let paused = now.saturating_duration_since(last_tick);

        self.last_tick_at = Some(now);
        self.last_move_at = self.last_move_at.map(|t| t + paused);
        self.last_food_at = self.last_food_at.map(|t| t + paused);
        self.effects.shift(paused);
    }

    /// Advance the simulation by one frame.
    ///
    /// Returns the events raised this tick, in order. Does nothing unless
    /// the run is in the `Running` phase.
    pub fn tick(&mut self, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.phase != Phase::Running {
            return events;
        }

        let dt = self
            .last_tick_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(Duration::ZERO);
        self.last_tick_at = Some(now);

        // 1. Combo window lapse
        if self.combo > 1 {
            if let Some(last_food) = self.last_food_at {
                if now.saturating_duration_since(last_food) > COMBO_WINDOW {
                    self.combo = 1;
                }
            }
        }

        // 2. Countdown, paused while a freeze is running
        if let Some(left) = self.time_left.as_mut() {
            if !self.effects.is_active(PowerUpKind::Freeze) {
                *left = left.saturating_sub(dt);
            }
            if left.is_zero() {
                self.finish_run(&mut events);
                return events;
            }
        }

        // 3. Expired effects
        for lapsed in self.effects.sweep(now) {
            match lapsed {
                PowerUpKind::Speed => {
                    self.base_interval = self.mode.base_interval_for_score(self.score);
                }
                PowerUpKind::ScoreX2 => {
                    self.score_multiplier = 1;
                }
                PowerUpKind::Shield | PowerUpKind::Freeze | PowerUpKind::Magnet => {}
            }
        }

        // 4. Committed move, paced by the current interval
        let move_due = self
            .last_move_at
            .map(|t| now.saturating_duration_since(t) >= self.current_interval())
            .unwrap_or(true);
        if !move_due {
            return events;
        }
        self.last_move_at = Some(now);

        if let Some(direction) = self.queue.pop() {
            self.snake.direction = direction;
        }

        let shielded = self.effects.is_active(PowerUpKind::Shield);
        let mut new_head = self.snake.head().moved_in_direction(self.snake.direction);

        if !new_head.in_bounds() {
            if !self.mode.wraps() && !shielded {
                self.finish_run(&mut events);
                return events;
            }
            new_head = new_head.wrapped();
        }

        // Self-collision is judged post-wrap, against the pre-move body
        if self.snake.collides_with_body(new_head)
            && self.mode.self_collision_lethal()
            && !shielded
        {
            self.finish_run(&mut events);
            return events;
        }

        self.snake.push_head(new_head);

        // 5. Consumption: food first, then the power-up item; one per tick
        let magnet = self.effects.is_active(PowerUpKind::Magnet);
        let mut consumed = false;

        if Self::in_reach(new_head, self.food.cell, magnet) {
            consumed = true;
            self.eat_food(now, &mut events);
        } else if let Some(item) = self.power_up {
            if Self::in_reach(new_head, item.cell, magnet) {
                consumed = true;
                self.power_up = None;
                self.activate_power_up(item.kind, now);
                events.push(GameEvent::PowerUpCollected(item.kind));
            }
        }

        // 6. No growth unless something was consumed
        if !consumed {
            self.snake.drop_tail();
        }

        events
    }

    /// Read-only view of the run state for observers
    pub fn snapshot(&self, now: Instant) -> GameSnapshot {
        let active_effects = self
            .effects
            .iter()
            .map(|effect| EffectStatus {
                kind: effect.kind,
                remaining: effect.expires_at.saturating_duration_since(now),
                duration: effect.duration,
            })
            .collect();

        GameSnapshot {
            mode: self.mode,
            phase: self.phase,
            snake: self.snake.body.clone(),
            direction: self.snake.direction,
            food: self.food,
            power_up: self.power_up,
            active_effects,
            score: self.score,
            apples: self.apples,
            combo: self.combo,
            max_combo: self.max_combo,
            time_remaining: self.time_left,
            current_interval: self.current_interval(),
        }
    }

    fn current_interval(&self) -> Duration {
        if self.effects.is_active(PowerUpKind::Speed) {
            self.mode.boosted_interval()
        } else {
            self.base_interval
        }
    }

    fn in_reach(head: Position, cell: Position, magnet: bool) -> bool {
        head == cell || (magnet && head.manhattan_distance(cell) <= MAGNET_RANGE)
    }

    fn eat_food(&mut self, now: Instant, events: &mut Vec<GameEvent>) {
        self.apples += 1;

        let within_window = self
            .last_food_at
            .map(|t| now.saturating_duration_since(t) <= COMBO_WINDOW)
            .unwrap_or(false);
        self.combo = if within_window { self.combo + 1 } else { 1 };
        self.max_combo = self.max_combo.max(self.combo);
        self.last_food_at = Some(now);

        let combo_multiplier = if self.combo <= 2 {
            1.0
        } else {
            1.0 + (self.combo - 2) as f64 * 0.5
        };
        let points = (self.food.kind.points() as f64
            * self.score_multiplier as f64
            * combo_multiplier)
            .floor() as u32;
        self.score += points;

        events.push(GameEvent::FoodEaten {
            points,
            combo: self.combo,
            kind: self.food.kind,
        });
        if self.combo >= 3 {
            events.push(GameEvent::ComboAdvanced { combo: self.combo });
        }

        if let Some(left) = self.time_left.as_mut() {
            *left += self.mode.food_time_bonus();
        }

        // Respawn food off-snake, then maybe a power-up off everything
        let food_cell = random_free_cell(&mut self.rng, &self.snake.body);
        self.food = Food::new(food_cell, FruitKind::random(&mut self.rng));

        if self.power_up.is_none() {
            if let Some(kind) = self.mode.roll_power_up(&mut self.rng) {
                let mut excluded = self.snake.body.clone();
                excluded.push(self.food.cell);
                let cell = random_free_cell(&mut self.rng, &excluded);
                self.power_up = Some(PowerUpItem { cell, kind });
            }
        }

        self.base_interval = self.mode.interval_after_food(self.base_interval);
    }

    fn activate_power_up(&mut self, kind: PowerUpKind, now: Instant) {
        self.effects.activate(kind, now);
        // Speed is derived from the effect set in current_interval()
        if kind == PowerUpKind::ScoreX2 {
            self.score_multiplier = 2;
        }
    }

    fn finish_run(&mut self, events: &mut Vec<GameEvent>) {
        self.phase = Phase::GameOver;
        self.queue.clear();
        events.push(GameEvent::GameOver {
            score: self.score,
            apples: self.apples,
        });
    }

    fn apply_initial_layout(&mut self) {
        self.snake = Snake::new(
            Position::new(GRID_SIZE / 2, GRID_SIZE / 2),
            Direction::Right,
            INITIAL_SNAKE_LENGTH,
        );
        self.queue.clear();

        let food_cell = random_free_cell(&mut self.rng, &self.snake.body);
        self.food = Food::new(food_cell, FruitKind::random(&mut self.rng));
        self.power_up = None;
        self.effects.clear();

        self.score = 0;
        self.apples = 0;
        self.combo = 1;
        self.max_combo = 1;
        self.score_multiplier = 1;
        self.base_interval = self.mode.initial_interval();
        self.time_left = self.mode.time_limit();
        self.last_food_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// Start a run and pin the snake/food layout so moves are predictable.
    fn start_pinned(mode: GameMode, t0: Instant) -> Game {
        let mut game = Game::new(mode);
        game.start(mode, t0);
        game.snake = Snake::new(Position::new(10, 10), Direction::Right, 3);
        game.food = Food::new(Position::new(0, 19), FruitKind::Apple);
        game.power_up = None;
        game
    }

    #[test]
    fn test_idle_until_started() {
        let mut game = Game::new(GameMode::Classic);
        assert_eq!(game.phase(), Phase::Idle);

        let events = game.tick(Instant::now());
        assert!(events.is_empty());
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn test_start_enters_running_with_fresh_entities() {
        let t0 = Instant::now();
        let mut game = Game::new(GameMode::Walls);
        game.start(GameMode::Walls, t0);

        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(game.score, 0);
        assert_eq!(game.time_left, Some(ms(30_000)));
        assert!(!game.snake.body.contains(&game.food.cell));
    }

    #[test]
    fn test_reset_is_noop_when_idle() {
        let t0 = Instant::now();
        let mut game = Game::new(GameMode::Classic);

        let before = game.snapshot(t0);
        game.reset();
        let after = game.snapshot(t0);

        assert_eq!(before, after);
        assert_eq!(after.phase, Phase::Idle);
        assert!(!after.game_over());
    }

    #[test]
    fn test_reset_after_game_over_clears_run() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.snake = Snake::new(Position::new(0, 10), Direction::Left, 3);

        game.tick(t0 + ms(100));
        assert_eq!(game.phase(), Phase::GameOver);

        game.reset();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.score, 0);
        assert_eq!(game.snake.len(), INITIAL_SNAKE_LENGTH);
        assert!(!game.snapshot(t0).game_over());
    }

    #[test]
    fn test_move_paced_by_interval() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        let head = game.snake.head();

        game.tick(t0 + ms(50));
        assert_eq!(game.snake.head(), head, "no move before the interval");

        game.tick(t0 + ms(100));
        assert_eq!(game.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_queue_rejected_while_idle() {
        let mut game = Game::new(GameMode::Classic);
        assert!(!game.queue_direction(Direction::Up));
    }

    #[test]
    fn test_queued_direction_commits_on_move() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);

        assert!(game.queue_direction(Direction::Up));
        game.tick(t0 + ms(100));

        assert_eq!(game.snake.direction, Direction::Up);
        assert_eq!(game.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn test_classic_food_directly_ahead() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.snake = Snake {
            body: vec![
                Position::new(10, 10),
                Position::new(10, 11),
                Position::new(10, 12),
            ],
            direction: Direction::Right,
        };
        game.food = Food::new(Position::new(11, 10), FruitKind::Apple);

        let events = game.tick(t0 + ms(100));

        assert_eq!(game.apples, 1);
        assert_eq!(game.score, 10);
        assert_eq!(game.snake.len(), 4);
        assert!(!game.snake.body.contains(&game.food.cell));
        assert!(events.contains(&GameEvent::FoodEaten {
            points: 10,
            combo: 1,
            kind: FruitKind::Apple,
        }));
    }

    #[test]
    fn test_classic_interval_drops_after_food() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.food = Food::new(Position::new(11, 10), FruitKind::Apple);

        game.tick(t0 + ms(100));
        assert_eq!(game.base_interval, ms(99));
    }

    #[test]
    fn test_combo_progression_and_points() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);

        // First food: combo 1, base points
        game.food = Food::new(Position::new(11, 10), FruitKind::Apple);
        game.tick(t0 + ms(100));
        assert_eq!(game.combo, 1);
        assert_eq!(game.score, 10);
        let t1 = t0 + ms(100);

        // 1000 ms later: inside the window, combo 2, multiplier still 1
        game.food = Food::new(Position::new(12, 10), FruitKind::Apple);
        game.tick(t1 + ms(1000));
        assert_eq!(game.combo, 2);
        assert_eq!(game.score, 20);

        // 500 ms later: combo 3, multiplier 1.5
        game.food = Food::new(Position::new(13, 10), FruitKind::Apple);
        let events = game.tick(t1 + ms(1500));
        assert_eq!(game.combo, 3);
        assert_eq!(game.score, 35);
        assert_eq!(game.max_combo, 3);
        assert!(events.contains(&GameEvent::ComboAdvanced { combo: 3 }));
    }

    #[test]
    fn test_combo_resets_after_window() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);

        game.food = Food::new(Position::new(11, 10), FruitKind::Apple);
        game.tick(t0 + ms(100));
        game.food = Food::new(Position::new(12, 10), FruitKind::Apple);
        game.tick(t0 + ms(1100));
        assert_eq!(game.combo, 2);

        // Window lapses with no food: combo collapses on the next tick
        game.tick(t0 + ms(4200));
        assert_eq!(game.combo, 1);
    }

    #[test]
    fn test_classic_wall_collision_is_lethal() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.snake = Snake::new(Position::new(0, 10), Direction::Left, 3);

        let events = game.tick(t0 + ms(100));

        assert_eq!(game.phase(), Phase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 0, apples: 0 }));
        // The fatal move never lands
        assert_eq!(game.snake.head(), Position::new(0, 10));
    }

    #[test]
    fn test_classic_shield_turns_wall_into_wrap() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.snake = Snake::new(Position::new(0, 10), Direction::Left, 3);
        game.effects.activate(PowerUpKind::Shield, t0);

        game.tick(t0 + ms(100));

        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake.head(), Position::new(GRID_SIZE - 1, 10));
    }

    #[test]
    fn test_walls_mode_wraps_without_shield() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.snake = Snake::new(Position::new(GRID_SIZE - 1, 5), Direction::Right, 3);

        game.tick(t0 + ms(100));

        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake.head(), Position::new(0, 5));
    }

    #[test]
    fn test_self_collision_lethal_in_walls() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.snake = Snake {
            body: vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(7, 5),
            ],
            direction: Direction::Right,
        };

        game.tick(t0 + ms(100));
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_self_collision_detected_post_wrap() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        // Head wraps from the right edge onto its own tail segment
        game.snake = Snake {
            body: vec![
                Position::new(GRID_SIZE - 1, 5),
                Position::new(GRID_SIZE - 1, 6),
                Position::new(0, 6),
                Position::new(0, 5),
            ],
            direction: Direction::Right,
        };

        game.tick(t0 + ms(100));
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn test_chill_self_collision_passes_through() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Chill, t0);
        game.snake = Snake {
            body: vec![
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(6, 6),
                Position::new(6, 5),
                Position::new(7, 5),
            ],
            direction: Direction::Right,
        };

        game.tick(t0 + ms(70));

        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.snake.head(), Position::new(6, 5));
        assert_eq!(game.snake.len(), 5);
    }

    #[test]
    fn test_walls_countdown_runs_out() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);

        let events = game.tick(t0 + ms(30_000));

        assert_eq!(game.phase(), Phase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 0, apples: 0 }));
    }

    #[test]
    fn test_walls_food_extends_countdown() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.food = Food::new(Position::new(11, 10), FruitKind::Apple);

        game.tick(t0 + ms(100));

        // 100 ms burned, 1000 ms granted back
        assert_eq!(game.time_left, Some(ms(30_900)));
    }

    #[test]
    fn test_freeze_pauses_countdown() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.effects.activate(PowerUpKind::Freeze, t0);

        game.tick(t0 + ms(1000));

        assert_eq!(game.time_left, Some(ms(30_000)));
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn test_countdown_resumes_after_freeze_expires() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.effects.activate(PowerUpKind::Freeze, t0);

        // Freeze still active: frozen
        game.tick(t0 + ms(4000));
        assert_eq!(game.time_left, Some(ms(30_000)));

        // This tick still sees the (expired) freeze before the sweep runs
        game.tick(t0 + ms(5000));
        assert_eq!(game.time_left, Some(ms(30_000)));
        assert!(!game.effects.is_active(PowerUpKind::Freeze));

        // Swept: the countdown burns again
        game.tick(t0 + ms(6000));
        assert_eq!(game.time_left, Some(ms(29_000)));
    }

    #[test]
    fn test_speed_power_up_overrides_interval_until_expiry() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.power_up = Some(PowerUpItem {
            cell: Position::new(11, 10),
            kind: PowerUpKind::Speed,
        });

        let events = game.tick(t0 + ms(100));
        assert!(events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Speed)));
        assert_eq!(game.current_interval(), ms(60));
        // Pickup counts as consumption: the snake grew
        assert_eq!(game.snake.len(), 4);

        // After expiry the base interval is back
        game.tick(t0 + ms(100) + PowerUpKind::Speed.duration());
        assert_eq!(game.current_interval(), ms(100));
    }

    #[test]
    fn test_speed_expiry_recomputes_classic_curve_from_score() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.score = 600;
        game.effects.activate(PowerUpKind::Speed, t0);
        assert_eq!(game.current_interval(), ms(60));

        game.tick(t0 + PowerUpKind::Speed.duration());

        assert_eq!(game.base_interval, ms(88));
    }

    #[test]
    fn test_score_x2_doubles_points_then_resets() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.power_up = Some(PowerUpItem {
            cell: Position::new(11, 10),
            kind: PowerUpKind::ScoreX2,
        });

        game.tick(t0 + ms(100));
        assert_eq!(game.score_multiplier, 2);

        game.food = Food::new(Position::new(12, 10), FruitKind::Apple);
        game.tick(t0 + ms(200));
        assert_eq!(game.score, 20);

        // Past the expiry, multiplier back to 1
        let late = t0 + ms(200) + PowerUpKind::ScoreX2.duration() + ms(100);
        game.food = Food::new(game.snake.head().moved_in_direction(game.snake.direction), FruitKind::Apple);
        game.tick(late);
        assert_eq!(game.score, 30);
        assert_eq!(game.score_multiplier, 1);
    }

    #[test]
    fn test_magnet_picks_up_food_at_range() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.effects.activate(PowerUpKind::Magnet, t0);
        // Next head is (11, 10); food 2 cells further is inside magnet range
        game.food = Food::new(Position::new(13, 10), FruitKind::Apple);

        game.tick(t0 + ms(100));

        assert_eq!(game.apples, 1);
        assert_eq!(game.snake.len(), 4);
    }

    #[test]
    fn test_food_is_not_picked_up_at_range_without_magnet() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.food = Food::new(Position::new(13, 10), FruitKind::Apple);

        game.tick(t0 + ms(100));

        assert_eq!(game.apples, 0);
        assert_eq!(game.snake.len(), 3);
    }

    #[test]
    fn test_food_takes_priority_over_power_up() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.effects.activate(PowerUpKind::Magnet, t0);
        game.food = Food::new(Position::new(12, 10), FruitKind::Apple);
        game.power_up = Some(PowerUpItem {
            cell: Position::new(11, 11),
            kind: PowerUpKind::Speed,
        });

        let events = game.tick(t0 + ms(100));

        // Both are in magnet reach of (11, 10); only the food is consumed
        assert_eq!(game.apples, 1);
        assert!(game.power_up.is_some());
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpCollected(_))));
    }

    #[test]
    fn test_resync_absorbs_paused_time() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);

        game.tick(t0 + ms(100));
        assert_eq!(game.snake.head(), Position::new(11, 10));

        // Host pauses for ~5 s, then resyncs before ticking again
        game.resync(t0 + ms(5100));

        game.tick(t0 + ms(5150));
        assert_eq!(game.snake.head(), Position::new(11, 10), "pause must not fast-forward moves");

        game.tick(t0 + ms(5200));
        assert_eq!(game.snake.head(), Position::new(12, 10));
    }

    #[test]
    fn test_start_after_game_over_begins_fresh_run() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Classic, t0);
        game.snake = Snake::new(Position::new(0, 10), Direction::Left, 3);
        game.tick(t0 + ms(100));
        assert_eq!(game.phase(), Phase::GameOver);

        let t1 = t0 + ms(2000);
        game.start(GameMode::Walls, t1);

        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.mode(), GameMode::Walls);
        assert_eq!(game.score, 0);
        assert_eq!(game.time_left, Some(ms(30_000)));
    }

    #[test]
    fn test_snapshot_reports_effect_remaining() {
        let t0 = Instant::now();
        let mut game = start_pinned(GameMode::Walls, t0);
        game.effects.activate(PowerUpKind::Magnet, t0);

        let snapshot = game.snapshot(t0 + ms(4000));

        assert_eq!(snapshot.active_effects.len(), 1);
        let status = snapshot.active_effects[0];
        assert_eq!(status.kind, PowerUpKind::Magnet);
        assert_eq!(status.duration, PowerUpKind::Magnet.duration());
        assert_eq!(status.remaining, ms(6000));
    }
}
