use rand::Rng;

use super::grid::Position;

/// Fruit variants the food item can take.
///
/// Each kind carries its own point value; the scoring formula multiplies it
/// by the active score and combo multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FruitKind {
    Apple,
    Banana,
    Grape,
}

impl FruitKind {
    pub const ALL: [FruitKind; 3] = [FruitKind::Apple, FruitKind::Banana, FruitKind::Grape];

    /// Base points awarded before multipliers
    pub fn points(self) -> u32 {
        match self {
            FruitKind::Apple => 10,
            FruitKind::Banana => 15,
            FruitKind::Grape => 20,
        }
    }

    /// Single-character board glyph
    pub fn glyph(self) -> char {
        match self {
            FruitKind::Apple => 'o',
            FruitKind::Banana => 'b',
            FruitKind::Grape => 'g',
        }
    }

    /// Pick a fruit kind uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Position,
    pub kind: FruitKind,
}

impl Food {
    pub fn new(cell: Position, kind: FruitKind) -> Self {
        Self { cell, kind }
    }
}
