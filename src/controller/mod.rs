pub mod config;

use log::{debug, info};

pub use self::config::{ConfigurationError, GameConfig};
use crate::gridsnake::{
    models::{DisplayInd, Event, FoodReq, ScoreInd},
    segments::Segments,
    types::{Cell, Position},
    world::World,
};

/// One-way, fire-and-forget outbound channel. The controller only ever
/// depends on this capability, never on a concrete transport.
pub trait Sink<T> {
    fn accept(&mut self, item: T);
}

impl<T, F: FnMut(T)> Sink<T> for F {
    fn accept(&mut self, item: T) {
        self(item);
    }
}

/// The authoritative game state machine.
///
/// Owns the world and the snake body outright; every mutation goes through
/// [`Controller::receive`], one event at a time, and each event's
/// notifications are emitted synchronously before the call returns.
pub struct Controller<D, F, S> {
    world:    World,
    segments: Segments,
    paused:   bool,
    display:  D,
    food:     F,
    score:    S,
}

impl<D, F, S> Controller<D, F, S>
where
    D: Sink<DisplayInd>,
    F: Sink<FoodReq>,
    S: Sink<ScoreInd>,
{
    /// Builds a session from its textual configuration and the three
    /// outbound channels.
    ///
    /// # Errors
    ///
    /// A malformed configuration aborts construction; see
    /// [`GameConfig::parse`].
    pub fn new(
        config: &str,
        display: D,
        food: F,
        score: S,
    ) -> Result<Self, ConfigurationError> {
        let config = GameConfig::parse(config)?;
        let mut segments = Segments::new(config.heading);
        for position in config.body {
            segments.add_segment(position);
        }
        Ok(Self {
            world: World::new(config.dimension, config.food),
            segments,
            paused: false,
            display,
            food,
            score,
        })
    }

    /// Processes one inbound event to completion.
    ///
    /// While paused, movement and heading changes are dropped silently;
    /// food traffic and pause toggles still go through.
    pub fn receive(&mut self, event: Event) {
        match event {
            Event::Timeout => {
                if !self.paused {
                    self.handle_timeout();
                }
            },
            Event::Direction { direction } => {
                if !self.paused {
                    self.segments.update_direction(direction);
                }
            },
            Event::FoodInd { position } => self.handle_food_ind(position),
            Event::FoodResp { position } => self.handle_food_resp(position),
            Event::Pause => self.paused = !self.paused,
        }
    }

    fn handle_timeout(&mut self) {
        let Some(candidate) = self.segments.next_head() else {
            return;
        };
        if self.segments.is_collision(candidate)
            || !self.world.contains(candidate.x, candidate.y)
        {
            info!("move to {candidate} loses the round");
            self.score.accept(ScoreInd::Lost);
        } else {
            self.place_head(candidate);
            if candidate == self.world.food_position() {
                self.score.accept(ScoreInd::Scored);
                self.food.accept(FoodReq);
            } else {
                self.clear_tail();
            }
        }
    }

    // An unsolicited placement supersedes food already on the board, so
    // the old cell has to be cleared; a response to our own request has
    // nothing pending to clear.
    fn handle_food_ind(&mut self, position: Position) {
        self.update_food(position, true);
    }

    fn handle_food_resp(&mut self, position: Position) {
        self.update_food(position, false);
    }

    fn update_food(&mut self, position: Position, clear_previous: bool) {
        if self.segments.is_collision(position)
            || !self.world.contains(position.x, position.y)
        {
            debug!("rejecting food at {position}, requesting a fresh one");
            self.food.accept(FoodReq);
            return;
        }

        if clear_previous {
            self.display.accept(DisplayInd {
                position: self.world.food_position(),
                value:    Cell::Free,
            });
        }
        self.world.set_food_position(position);
        self.display.accept(DisplayInd {
            position,
            value: Cell::Food,
        });
    }

    fn place_head(&mut self, position: Position) {
        self.segments.add_head(position);
        self.display.accept(DisplayInd {
            position,
            value: Cell::Snake,
        });
    }

    fn clear_tail(&mut self) {
        if let Some(tail) = self.segments.remove_tail() {
            self.display.accept(DisplayInd {
                position: tail,
                value:    Cell::Free,
            });
        }
    }
}

impl<D, F, S> Controller<D, F, S> {
    #[must_use]
    pub const fn paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    #[must_use]
    pub const fn segments(&self) -> &Segments {
        &self.segments
    }
}
