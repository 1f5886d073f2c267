use crate::gridsnake::types::{Dimension, Position};

/// The board: fixed bounds plus the food currently on it.
#[derive(Debug, Clone)]
pub struct World {
    dimension: Dimension,
    food:      Position,
}

impl World {
    #[must_use]
    pub const fn new(dimension: Dimension, food: Position) -> Self {
        Self { dimension, food }
    }

    /// Overwrites the stored food position. No validation happens here,
    /// callers vet candidates against bounds and body first.
    pub fn set_food_position(&mut self, position: Position) {
        self.food = position;
    }

    #[must_use]
    pub const fn food_position(&self) -> Position {
        self.food
    }

    #[must_use]
    pub const fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.dimension.width && y < self.dimension.height
    }
}
