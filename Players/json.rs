//! Wire encodings for the data a player's strategy produces: which brute-force strategy to run,
//! and the move/pass choice sent back to the referee.

use common::direction::Direction;
use common::json::{Coordinate, JsonDegree, JsonDegreeError, JsonDirection};
use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::strategy::{NaiveStrategy, PlayerMove};

/// Describes either a `Riemann` or a `Euclid` strategy.
#[derive(Debug, Deserialize)]
pub enum JsonStrategyDesignation {
    Riemann,
    Euclid,
}

impl From<JsonStrategyDesignation> for NaiveStrategy {
    fn from(jsd: JsonStrategyDesignation) -> Self {
        match jsd {
            JsonStrategyDesignation::Riemann => NaiveStrategy::Riemann,
            JsonStrategyDesignation::Euclid => NaiveStrategy::Euclid,
        }
    }
}

#[derive(Debug, Error)]
pub enum JsonChoiceError {
    #[error(transparent)]
    Degree(#[from] JsonDegreeError),
}

/// A player's chosen action for a turn: either `"PASS"`, or a 4-tuple of the slide index, slide
/// direction, counter-clockwise rotation in degrees, and the destination coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonChoice {
    Pass,
    Move(usize, JsonDirection, JsonDegree, Coordinate),
}

impl<'de> Deserialize<'de> for JsonChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MaybeChoice {
            Pass(String),
            Move(usize, JsonDirection, JsonDegree, Coordinate),
        }

        match MaybeChoice::deserialize(deserializer)? {
            MaybeChoice::Pass(s) if s == "PASS" => Ok(JsonChoice::Pass),
            MaybeChoice::Pass(s) => Err(de::Error::unknown_variant(&s, &["PASS"])),
            MaybeChoice::Move(index, direction, degree, coordinate) => {
                Ok(JsonChoice::Move(index, direction, degree, coordinate))
            }
        }
    }
}

impl Serialize for JsonChoice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        match self {
            JsonChoice::Pass => serializer.serialize_str("PASS"),
            JsonChoice::Move(index, direction, degree, coordinate) => {
                let mut tup = serializer.serialize_tuple(4)?;
                tup.serialize_element(index)?;
                tup.serialize_element(direction)?;
                tup.serialize_element(degree)?;
                tup.serialize_element(coordinate)?;
                tup.end()
            }
        }
    }
}

impl JsonChoice {
    pub fn into_move(self) -> Result<PlayerMove, JsonChoiceError> {
        match self {
            JsonChoice::Pass => Ok(PlayerMove::Pass),
            JsonChoice::Move(index, direction, degree, coordinate) => Ok(PlayerMove::Move {
                slide_index: index,
                slide_direction: Direction::from(direction),
                rotations: degree.to_clockwise_quarter_turns()? as usize,
                destination: coordinate.into(),
            }),
        }
    }
}

impl From<PlayerMove> for JsonChoice {
    fn from(action: PlayerMove) -> Self {
        match action {
            PlayerMove::Pass => JsonChoice::Pass,
            PlayerMove::Move { slide_index, slide_direction, rotations, destination } => JsonChoice::Move(
                slide_index,
                slide_direction.into(),
                JsonDegree::from_clockwise_quarter_turns(rotations as i32),
                destination.into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::position::Position;

    #[test]
    fn pass_roundtrips() {
        assert_eq!("\"PASS\"", serde_json::to_string(&JsonChoice::Pass).unwrap());
        let back: JsonChoice = serde_json::from_str("\"PASS\"").unwrap();
        assert_eq!(back, JsonChoice::Pass);
        assert_eq!(back.into_move().unwrap(), PlayerMove::Pass);
    }

    #[test]
    fn move_roundtrips_with_ccw_wire_degrees() {
        let choice: JsonChoice = serde_json::from_str("[1,\"LEFT\",90,{\"row#\":0,\"column#\":0}]").unwrap();
        assert_eq!(choice, JsonChoice::Move(1, JsonDirection::LEFT, JsonDegree(90), Coordinate { row: 0, column: 0 }));

        let player_move = choice.into_move().unwrap();
        match player_move {
            PlayerMove::Move { slide_index, rotations, destination, .. } => {
                assert_eq!(slide_index, 1);
                // 90 degrees counter-clockwise is 3 quarter turns clockwise.
                assert_eq!(rotations, 3);
                assert_eq!(destination, Position::new(0, 0));
            }
            PlayerMove::Pass => panic!("expected a move"),
        }

        let back = JsonChoice::from(PlayerMove::Move {
            slide_index: 1,
            slide_direction: Direction::Left,
            rotations: 3,
            destination: Position::new(0, 0),
        });
        assert_eq!(back, choice);
        assert_eq!(
            serde_json::to_string(&back).unwrap(),
            "[1,\"LEFT\",90,{\"row#\":0,\"column#\":0}]"
        );
    }

    #[test]
    fn rejects_non_multiple_of_90() {
        let choice = JsonChoice::Move(0, JsonDirection::UP, JsonDegree(45), Coordinate { row: 0, column: 0 });
        assert!(choice.into_move().is_err());
    }
}
