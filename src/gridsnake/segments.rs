use std::collections::VecDeque;

use itertools::Itertools;

use crate::gridsnake::types::{Direction, Position};

/// The snake body plus the heading its next move follows.
///
/// Segments arrive tail-first during setup, so the deque keeps the tail at
/// the front and the head at the back; every mutation is O(1) at an end.
#[derive(Debug, Clone)]
pub struct Segments {
    heading: Direction,
    body:    VecDeque<Position>,
}

impl Segments {
    #[must_use]
    pub const fn new(heading: Direction) -> Self {
        Self {
            heading,
            body: VecDeque::new(),
        }
    }

    /// Setup only: appends the next segment in tail-to-head order.
    pub fn add_segment(&mut self, position: Position) {
        self.body.push_back(position);
    }

    /// Where the head would land if the snake moved now. `None` only for a
    /// body that was never populated.
    #[must_use]
    pub fn next_head(&self) -> Option<Position> {
        self.body.back().map(|head| head.neighbour(self.heading))
    }

    #[must_use]
    pub fn is_collision(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Commits a new head. Callers vet the position against the body and
    /// the world bounds first.
    pub fn add_head(&mut self, position: Position) {
        self.body.push_back(position);
        debug_assert!(self.positions().all_unique(), "body must stay disjoint");
    }

    pub fn remove_tail(&mut self) -> Option<Position> {
        self.body.pop_front()
    }

    /// No reversal guard: an immediate 180° turn is accepted and will
    /// collide with the neck on the next move.
    pub fn update_direction(&mut self, direction: Direction) {
        self.heading = direction;
    }

    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Tail-to-head walk over the body.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }
}
