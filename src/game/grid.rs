use rand::Rng;

use super::action::Direction;

/// Number of cells along each axis of the square play field.
pub const GRID_SIZE: i32 = 20;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies inside the grid
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.x < GRID_SIZE && self.y >= 0 && self.y < GRID_SIZE
    }

    /// Relocate an out-of-bounds coordinate to the opposite edge
    pub fn wrapped(&self) -> Self {
        Self {
            x: self.x.rem_euclid(GRID_SIZE),
            y: self.y.rem_euclid(GRID_SIZE),
        }
    }

    /// Manhattan distance to another position, used for magnet-range pickups
    pub fn manhattan_distance(&self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Sample a uniformly random cell not present in `excluded`.
///
/// Rejection sampling is bounded to 100 attempts. If the budget runs out
/// (a heavily occupied board), the grid is scanned in row order for the
/// first free cell; only a completely full grid yields the origin.
pub fn random_free_cell<R: Rng>(rng: &mut R, excluded: &[Position]) -> Position {
    const ATTEMPTS: usize = 100;

    for _ in 0..ATTEMPTS {
        let cell = Position::new(rng.gen_range(0..GRID_SIZE), rng.gen_range(0..GRID_SIZE));
        if !excluded.contains(&cell) {
            return cell;
        }
    }

    // Deterministic fallback once random sampling keeps missing.
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let cell = Position::new(x, y);
            if !excluded.contains(&cell) {
                return cell;
            }
        }
    }

    Position::new(0, 0)
}
