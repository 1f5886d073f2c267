use serde::{Deserialize, Serialize};

use crate::gridsnake::types::{Cell, Direction, Position};

/// Everything the controller reacts to. One event is processed to
/// completion before the next is accepted; an unknown `kind` on the wire
/// fails deserialization and is treated as a protocol violation by the
/// transport.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Timeout,
    Direction { direction: Direction },
    FoodInd { position: Position },
    FoodResp { position: Position },
    Pause,
}

/// "Set this cell to this value", the only thing a display ever hears.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInd {
    pub position: Position,
    pub value:    Cell,
}

/// Ask the food collaborator for a fresh position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodReq;

/// The score channel carries both the point signal and the loss signal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreInd {
    Scored,
    Lost,
}

/// Flattened view over the three outbound channels, for consumers that
/// need one ordered record of everything an event produced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    Display { position: Position, value: Cell },
    FoodRequest,
    Score,
    Loss,
}

impl From<DisplayInd> for Notification {
    fn from(ind: DisplayInd) -> Self {
        Self::Display {
            position: ind.position,
            value:    ind.value,
        }
    }
}

impl From<FoodReq> for Notification {
    fn from(_: FoodReq) -> Self {
        Self::FoodRequest
    }
}

impl From<ScoreInd> for Notification {
    fn from(ind: ScoreInd) -> Self {
        match ind {
            ScoreInd::Scored => Self::Score,
            ScoreInd::Lost => Self::Loss,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Status {
    pub name:    String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::Event;
    use crate::gridsnake::types::{Direction, Position};

    #[test]
    fn events_deserialize_from_tagged_json() {
        let event: Event = serde_json::from_str(r#"{"kind":"timeout"}"#)
            .expect("timeout should deserialize");
        assert_eq!(event, Event::Timeout);

        let event: Event =
            serde_json::from_str(r#"{"kind":"direction","direction":"left"}"#)
                .expect("direction should deserialize");
        assert_eq!(
            event,
            Event::Direction {
                direction: Direction::Left
            }
        );

        let event: Event = serde_json::from_str(
            r#"{"kind":"food_resp","position":{"x":2,"y":7}}"#,
        )
        .expect("food_resp should deserialize");
        assert_eq!(
            event,
            Event::FoodResp {
                position: Position { x: 2, y: 7 }
            }
        );
    }

    #[test]
    fn unknown_event_kind_is_rejected() {
        let result: Result<Event, _> =
            serde_json::from_str(r#"{"kind":"teleport"}"#);
        assert!(result.is_err());
    }
}
