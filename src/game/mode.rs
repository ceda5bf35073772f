use std::time::Duration;

use rand::Rng;

use super::effects::PowerUpKind;

/// Slowest the classic speed curve is allowed to get
const CLASSIC_FLOOR: Duration = Duration::from_millis(50);

/// Game mode, fixed for the duration of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    /// Speeds up with every food; walls are lethal
    Classic,
    /// 30 second countdown, eating adds time; walls wrap
    Walls,
    /// Slow fixed pace, long timer, nothing lethal
    Chill,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Walls, GameMode::Chill];

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Walls => "walls",
            GameMode::Chill => "chill",
        }
    }

    /// Move interval at the start of a run
    pub fn initial_interval(self) -> Duration {
        match self {
            GameMode::Classic | GameMode::Walls => Duration::from_millis(100),
            GameMode::Chill => Duration::from_millis(70),
        }
    }

    /// Countdown budget, if this mode is timed
    pub fn time_limit(self) -> Option<Duration> {
        match self {
            GameMode::Classic => None,
            GameMode::Walls => Some(Duration::from_millis(30_000)),
            GameMode::Chill => Some(Duration::from_millis(120_000)),
        }
    }

    /// Countdown extension granted per food eaten
    pub fn food_time_bonus(self) -> Duration {
        match self {
            GameMode::Walls => Duration::from_millis(1000),
            GameMode::Classic | GameMode::Chill => Duration::ZERO,
        }
    }

    /// Whether an out-of-bounds head teleports to the opposite edge.
    /// In classic it does not, and the collision is lethal unless shielded.
    pub fn wraps(self) -> bool {
        !matches!(self, GameMode::Classic)
    }

    /// Whether running into the own body ends the run
    pub fn self_collision_lethal(self) -> bool {
        !matches!(self, GameMode::Chill)
    }

    /// Move interval after one food is eaten, given the current base interval
    pub fn interval_after_food(self, current: Duration) -> Duration {
        match self {
            GameMode::Classic => current.saturating_sub(Duration::from_millis(1)).max(CLASSIC_FLOOR),
            GameMode::Walls | GameMode::Chill => current,
        }
    }

    /// Base move interval recomputed from the score, used when a speed
    /// boost expires and the curve has to be re-derived
    pub fn base_interval_for_score(self, score: u32) -> Duration {
        match self {
            GameMode::Classic => {
                Duration::from_millis(u64::from(100u32.saturating_sub(score / 50)).max(50))
            }
            GameMode::Walls => Duration::from_millis(100),
            GameMode::Chill => Duration::from_millis(70),
        }
    }

    /// Move interval while a speed boost is active
    pub fn boosted_interval(self) -> Duration {
        match self {
            GameMode::Classic | GameMode::Walls => Duration::from_millis(60),
            GameMode::Chill => Duration::from_millis(50),
        }
    }

    /// Probability that eating food spawns a power-up item
    pub fn power_up_chance(self) -> f64 {
        match self {
            GameMode::Classic => 0.15,
            GameMode::Walls => 0.40,
            GameMode::Chill => 0.30,
        }
    }

    /// Kinds this mode's spawn table can produce
    pub fn power_up_table(self) -> &'static [PowerUpKind] {
        match self {
            GameMode::Walls => &[
                PowerUpKind::Freeze,
                PowerUpKind::ScoreX2,
                PowerUpKind::Speed,
                PowerUpKind::Shield,
                PowerUpKind::Magnet,
            ],
            GameMode::Classic | GameMode::Chill => &[
                PowerUpKind::Speed,
                PowerUpKind::ScoreX2,
                PowerUpKind::Magnet,
            ],
        }
    }

    /// Roll the spawn table once: `Some(kind)` with this mode's probability,
    /// uniform over the mode's table
    pub fn roll_power_up<R: Rng>(self, rng: &mut R) -> Option<PowerUpKind> {
        if !rng.gen_bool(self.power_up_chance()) {
            return None;
        }
        let table = self.power_up_table();
        Some(table[rng.gen_range(0..table.len())])
    }
}
