use std::time::{Duration, Instant};

use super::grid::Position;

/// Power-up kinds that can spawn on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Temporarily forces a faster move interval
    Speed,
    /// Doubles the score multiplier
    ScoreX2,
    /// Lethal collisions resolve as a wrap instead
    Shield,
    /// Pauses the countdown timer (walls mode)
    Freeze,
    /// Picks up food and items within Manhattan distance 3
    Magnet,
}

impl PowerUpKind {
    /// How long an activated instance of this kind lasts
    pub fn duration(self) -> Duration {
        match self {
            PowerUpKind::Speed => Duration::from_millis(5000),
            PowerUpKind::ScoreX2 => Duration::from_millis(8000),
            PowerUpKind::Shield => Duration::from_millis(6000),
            PowerUpKind::Freeze => Duration::from_millis(5000),
            PowerUpKind::Magnet => Duration::from_millis(10_000),
        }
    }

    /// Short label for HUD badges
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Speed => "SPD",
            PowerUpKind::ScoreX2 => "2X",
            PowerUpKind::Shield => "SHD",
            PowerUpKind::Freeze => "FRZ",
            PowerUpKind::Magnet => "MAG",
        }
    }

    /// Single-character board glyph
    pub fn glyph(self) -> char {
        match self {
            PowerUpKind::Speed => 'S',
            PowerUpKind::ScoreX2 => '2',
            PowerUpKind::Shield => 'H',
            PowerUpKind::Freeze => 'F',
            PowerUpKind::Magnet => 'M',
        }
    }
}

/// The single pickup that may be present on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpItem {
    pub cell: Position,
    pub kind: PowerUpKind,
}

/// A running power-up instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveEffect {
    pub kind: PowerUpKind,
    pub expires_at: Instant,
    pub duration: Duration,
}

/// The set of currently active effects.
///
/// Multiple kinds may run concurrently, but activating a kind that is
/// already running replaces the existing instance (refresh, not stack).
#[derive(Debug, Default)]
pub struct EffectSet {
    active: Vec<ActiveEffect>,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `kind`, refreshing any existing instance of the same kind
    pub fn activate(&mut self, kind: PowerUpKind, now: Instant) {
        self.active.retain(|effect| effect.kind != kind);

        let duration = kind.duration();
        self.active.push(ActiveEffect {
            kind,
            expires_at: now + duration,
            duration,
        });
    }

    /// Whether an instance of `kind` is currently in the set.
    ///
    /// Expired instances linger until the next [`sweep`](Self::sweep), which
    /// the game loop runs once per tick before querying.
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active.iter().any(|effect| effect.kind == kind)
    }

    /// Remove every effect whose expiry has passed, returning the lapsed kinds
    pub fn sweep(&mut self, now: Instant) -> Vec<PowerUpKind> {
        let mut lapsed = Vec::new();
        self.active.retain(|effect| {
            if effect.expires_at <= now {
                lapsed.push(effect.kind);
                false
            } else {
                true
            }
        });
        lapsed
    }

    /// Push every expiry forward by `delta`. Used when resuming from pause so
    /// effects do not silently burn down while the loop is not ticking.
    pub fn shift(&mut self, delta: Duration) {
        for effect in &mut self.active {
            effect.expires_at += delta;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.active.iter()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
