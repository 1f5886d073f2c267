use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;

use crate::gridsnake::types::{Dimension, Direction, Position};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("configuration ended early, expected {0}")]
    Truncated(&'static str),
    #[error("expected the `{expected}` marker, got `{got}`")]
    BadMarker { expected: char, got: String },
    #[error("`{got}` is not a valid {field}")]
    BadNumber { field: &'static str, got: String },
    #[error("`{0}` is not a heading (expected one of U, D, L, R)")]
    BadHeading(String),
}

/// Startup description of a session: bounds, the first food, the initial
/// heading and the body laid out tail-first.
///
/// The wire shape is a whitespace-separated token stream, e.g.
/// `W 5 5 F 3 3 S R 2 1 1 2 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub dimension: Dimension,
    pub food:      Position,
    pub heading:   Direction,
    pub body:      Vec<Position>,
}

impl GameConfig {
    /// # Errors
    ///
    /// Any deviation from the wire shape above is fatal: a wrong marker,
    /// an unparseable number, an unknown heading or a truncated stream.
    pub fn parse(input: &str) -> Result<Self, ConfigurationError> {
        let mut tokens = input.split_whitespace();

        marker(&mut tokens, 'W')?;
        let dimension = Dimension {
            width:  number(&mut tokens, "width")?,
            height: number(&mut tokens, "height")?,
        };

        marker(&mut tokens, 'F')?;
        let food = Position {
            x: number(&mut tokens, "food x")?,
            y: number(&mut tokens, "food y")?,
        };

        marker(&mut tokens, 'S')?;
        let heading = match next(&mut tokens, "a heading")? {
            "U" => Direction::Up,
            "D" => Direction::Down,
            "L" => Direction::Left,
            "R" => Direction::Right,
            other => return Err(ConfigurationError::BadHeading(other.to_owned())),
        };

        let count: usize = number(&mut tokens, "segment count")?;
        let mut body = Vec::with_capacity(count);
        for _ in 0..count {
            body.push(Position {
                x: number(&mut tokens, "segment x")?,
                y: number(&mut tokens, "segment y")?,
            });
        }

        Ok(Self {
            dimension,
            food,
            heading,
            body,
        })
    }
}

fn next<'a>(
    tokens: &mut SplitWhitespace<'a>,
    expected: &'static str,
) -> Result<&'a str, ConfigurationError> {
    tokens.next().ok_or(ConfigurationError::Truncated(expected))
}

fn marker(
    tokens: &mut SplitWhitespace,
    expected: char,
) -> Result<(), ConfigurationError> {
    let got = next(tokens, "a section marker")?;
    if got.len() == 1 && got.starts_with(expected) {
        Ok(())
    } else {
        Err(ConfigurationError::BadMarker {
            expected,
            got: got.to_owned(),
        })
    }
}

fn number<T: FromStr>(
    tokens: &mut SplitWhitespace,
    field: &'static str,
) -> Result<T, ConfigurationError> {
    let got = next(tokens, field)?;
    got.parse().map_err(|_| ConfigurationError::BadNumber {
        field,
        got: got.to_owned(),
    })
}
