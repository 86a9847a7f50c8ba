//! Wire-format types and their conversions to and from the in-memory model. Every JSON type
//! here mirrors a shape from the external protocol; conversions are explicit `From`/`TryFrom`
//! impls rather than `#[serde(with = ...)]` so the wire format can diverge from the model
//! without entangling the two.

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::color::Color;
use crate::direction::Direction;
use crate::gem::Gem;
use crate::grid::Grid;
use crate::player_details::PlayerDetails;
use crate::position::Position;
use crate::shape::{ConnectorShape, PathOrientation};
use crate::state::RedactedState;
use crate::tile::Tile;

/// A zero-indexed row/column pair, sent on the wire as `{"row#": .., "column#": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "row#")]
    pub row: usize,
    #[serde(rename = "column#")]
    pub column: usize,
}

impl From<Position> for Coordinate {
    fn from(pos: Position) -> Self {
        Coordinate { row: pos.row, column: pos.col }
    }
}

impl From<Coordinate> for Position {
    fn from(val: Coordinate) -> Self {
        Position::new(val.row, val.column)
    }
}

/// The eleven box-drawing characters used as the wire representation of a tile's connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connector {
    #[serde(rename = "│")]
    VerticalPath,
    #[serde(rename = "─")]
    HorizontalPath,
    #[serde(rename = "┐")]
    SouthCorner,
    #[serde(rename = "└")]
    NorthCorner,
    #[serde(rename = "┌")]
    EastCorner,
    #[serde(rename = "┘")]
    WestCorner,
    #[serde(rename = "┬")]
    SouthFork,
    #[serde(rename = "┴")]
    NorthFork,
    #[serde(rename = "┤")]
    WestFork,
    #[serde(rename = "├")]
    EastFork,
    #[serde(rename = "┼")]
    Crossroads,
}

impl From<ConnectorShape> for Connector {
    fn from(shape: ConnectorShape) -> Self {
        use ConnectorShape::*;
        use Direction::*;
        use PathOrientation::*;
        match shape {
            Path(Horizontal) => Connector::HorizontalPath,
            Path(Vertical) => Connector::VerticalPath,
            Corner(Down) => Connector::SouthCorner,
            Corner(Up) => Connector::NorthCorner,
            Corner(Right) => Connector::EastCorner,
            Corner(Left) => Connector::WestCorner,
            Fork(Down) => Connector::SouthFork,
            Fork(Up) => Connector::NorthFork,
            Fork(Left) => Connector::WestFork,
            Fork(Right) => Connector::EastFork,
            Crossroads => Connector::Crossroads,
        }
    }
}

impl From<Connector> for ConnectorShape {
    fn from(val: Connector) -> Self {
        use ConnectorShape::*;
        use Direction::*;
        use PathOrientation::*;
        match val {
            Connector::VerticalPath => Path(Vertical),
            Connector::HorizontalPath => Path(Horizontal),
            Connector::SouthCorner => Corner(Down),
            Connector::NorthCorner => Corner(Up),
            Connector::EastCorner => Corner(Right),
            Connector::WestCorner => Corner(Left),
            Connector::SouthFork => Fork(Down),
            Connector::NorthFork => Fork(Up),
            Connector::WestFork => Fork(Left),
            Connector::EastFork => Fork(Right),
            Connector::Crossroads => Crossroads,
        }
    }
}

/// The wire representation of a single [`Tile`]: its connector plus the two gem images, in an
/// arbitrary but stable order (tile equality ignores gem order, so the order isn't meaningful).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonTile {
    pub tilekey: Connector,
    #[serde(rename = "1-image")]
    pub image1: Gem,
    #[serde(rename = "2-image")]
    pub image2: Gem,
}

impl From<&Tile> for JsonTile {
    fn from(tile: &Tile) -> Self {
        JsonTile {
            tilekey: tile.connector.into(),
            image1: tile.gems.0,
            image2: tile.gems.1,
        }
    }
}

impl From<JsonTile> for Tile {
    fn from(val: JsonTile) -> Self {
        Tile {
            connector: val.tilekey.into(),
            gems: (val.image1, val.image2).into(),
        }
    }
}

/// The wire representation of a [`Board`]'s grid: parallel row-major matrices of connectors and
/// treasures. Does not carry the spare tile, which travels alongside it in [`JsonState`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonBoard {
    connectors: Vec<Vec<Connector>>,
    treasures: Vec<Vec<(Gem, Gem)>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonBoardError {
    #[error("connectors and treasures matrices must be rectangular and the same size")]
    Ragged,
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl From<&Board> for JsonBoard {
    fn from(board: &Board) -> Self {
        let mut connectors = Vec::with_capacity(board.height());
        let mut treasures = Vec::with_capacity(board.height());
        for row in 0..board.height() {
            let mut c_row = Vec::with_capacity(board.width());
            let mut t_row = Vec::with_capacity(board.width());
            for col in 0..board.width() {
                let tile = board.tile_at(Position::new(row, col)).expect("row/col in bounds");
                c_row.push(tile.connector.into());
                t_row.push((tile.gems.0, tile.gems.1));
            }
            connectors.push(c_row);
            treasures.push(t_row);
        }
        JsonBoard { connectors, treasures }
    }
}

impl JsonBoard {
    /// Rebuilds a [`Board`] from this grid and a separately-provided spare tile.
    pub fn into_board(self, spare: Tile) -> Result<Board, JsonBoardError> {
        if self.connectors.len() != self.treasures.len() {
            return Err(JsonBoardError::Ragged);
        }
        let width = self.connectors.first().map_or(0, Vec::len);
        let rows = self
            .connectors
            .into_iter()
            .zip(self.treasures)
            .map(|(c_row, t_row)| {
                if c_row.len() != width || t_row.len() != width {
                    return Err(JsonBoardError::Ragged);
                }
                Ok(c_row
                    .into_iter()
                    .zip(t_row)
                    .map(|(connector, gems)| Tile { connector: connector.into(), gems: gems.into() })
                    .collect())
            })
            .collect::<Result<Vec<Vec<Tile>>, JsonBoardError>>()?;
        Board::new(Grid::from_rows(rows), spare).map_err(JsonBoardError::from)
    }
}

/// Describes a player's current location, home location, and avatar color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPlayer {
    pub current: Coordinate,
    pub home: Coordinate,
    pub color: Color,
}

impl From<&PlayerDetails> for JsonPlayer {
    fn from(player: &PlayerDetails) -> Self {
        JsonPlayer {
            current: player.current.into(),
            home: player.home.into(),
            color: player.color.clone(),
        }
    }
}

impl From<JsonPlayer> for PlayerDetails {
    fn from(val: JsonPlayer) -> Self {
        PlayerDetails {
            home: val.home.into(),
            current: val.current.into(),
            color: val.color,
        }
    }
}

/// The direction of a slide, as spelled on the wire. Kept distinct from [`Direction`] so the
/// model type stays free to add internal-only meanings (e.g. an edge's own orientation) without
/// touching the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum JsonDirection {
    LEFT,
    RIGHT,
    UP,
    DOWN,
}

impl From<Direction> for JsonDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => JsonDirection::LEFT,
            Direction::Right => JsonDirection::RIGHT,
            Direction::Up => JsonDirection::UP,
            Direction::Down => JsonDirection::DOWN,
        }
    }
}

impl From<JsonDirection> for Direction {
    fn from(val: JsonDirection) -> Self {
        match val {
            JsonDirection::LEFT => Direction::Left,
            JsonDirection::RIGHT => Direction::Right,
            JsonDirection::UP => Direction::Up,
            JsonDirection::DOWN => Direction::Down,
        }
    }
}

/// A rotation amount exactly as it appears on the wire: counter-clockwise degrees. The protocol
/// maps this to the model's clockwise quarter turns via `cw = (-ccw) mod 360` (see
/// [`JsonDegree::to_clockwise_quarter_turns`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonDegree(pub i32);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("rotation degree must be a multiple of 90")]
pub struct JsonDegreeError;

impl JsonDegree {
    pub fn to_clockwise_quarter_turns(self) -> Result<i32, JsonDegreeError> {
        if self.0 % 90 != 0 {
            return Err(JsonDegreeError);
        }
        Ok((-self.0 / 90).rem_euclid(4))
    }

    pub fn from_clockwise_quarter_turns(quarter_turns: i32) -> Self {
        JsonDegree((-quarter_turns * 90).rem_euclid(360))
    }
}

/// The last slide performed, if any. Deserialization accepts either `false` or `null` for "no
/// slide yet", matching the two forms seen from different clients; serialization always
/// produces `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum JsonAction {
    None(bool),
    Move(usize, JsonDirection),
}

impl<'de> Deserialize<'de> for JsonAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::Bool(_) | serde_json::Value::Null => Ok(JsonAction::None(false)),
            serde_json::Value::Array(_) => {
                let (index, direction): (usize, JsonDirection) =
                    serde_json::from_value(value).map_err(serde::de::Error::custom)?;
                Ok(JsonAction::Move(index, direction))
            }
            _ => Err(serde::de::Error::custom("expected false, null, or [index, direction]")),
        }
    }
}

impl JsonAction {
    pub fn from_last_move(last: Option<&(usize, Direction)>) -> Self {
        match last {
            Some(&(index, direction)) => JsonAction::Move(index, direction.into()),
            None => JsonAction::None(false),
        }
    }

    pub fn into_last_move(self) -> Option<(usize, Direction)> {
        match self {
            JsonAction::None(_) => None,
            JsonAction::Move(index, direction) => Some((index, direction.into())),
        }
    }
}

/// The wire representation of a [`RedactedState`]: the board, the spare tile, the players in
/// turn order with the active player first, and the last slide performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonState {
    pub board: JsonBoard,
    pub spare: JsonTile,
    pub plmt: Vec<JsonPlayer>,
    pub last: JsonAction,
}

impl From<&RedactedState> for JsonState {
    fn from(state: &RedactedState) -> Self {
        let mut plmt: Vec<JsonPlayer> = state.players.iter().map(JsonPlayer::from).collect();
        plmt.rotate_left(state.active_index.min(plmt.len()));
        JsonState {
            board: JsonBoard::from(&state.board),
            spare: JsonTile::from(state.board.spare()),
            plmt,
            last: JsonAction::from_last_move(state.history.last()),
        }
    }
}

impl TryFrom<JsonState> for RedactedState {
    type Error = JsonBoardError;

    /// The wire format only ever carries the most recent slide, so the reconstructed history
    /// has at most one entry; the active player is always at index 0, matching `plmt`'s
    /// ordering convention.
    fn try_from(val: JsonState) -> Result<Self, Self::Error> {
        let board = val.board.into_board(val.spare.into())?;
        let players = val.plmt.into_iter().map(PlayerDetails::from).collect();
        let history = val.last.into_last_move().into_iter().collect();
        Ok(RedactedState { board, history, players, active_index: 0 })
    }
}

/// True iff every element of `items` is distinct; used to validate that no two signed-up
/// players share a color or home position during setup.
pub fn has_unique_elements<T>(items: &[T]) -> bool
where
    T: Eq + Hash,
{
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(|item| seen.insert(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorName;

    #[test]
    fn coordinate_roundtrip() {
        let pos = Position::new(2, 5);
        let coord: Coordinate = pos.into();
        assert_eq!(Position::from(coord), pos);
    }

    #[test]
    fn connector_roundtrip_through_all_eleven_shapes() {
        for num in 0..11 {
            let shape = ConnectorShape::from_num(num);
            let connector: Connector = shape.into();
            assert_eq!(ConnectorShape::from(connector), shape);
        }
    }

    #[test]
    fn json_action_accepts_false_and_null() {
        assert_eq!(serde_json::from_str::<JsonAction>("false").unwrap(), JsonAction::None(false));
        assert_eq!(serde_json::from_str::<JsonAction>("null").unwrap(), JsonAction::None(false));
        assert_eq!(
            serde_json::from_str::<JsonAction>("[3, \"LEFT\"]").unwrap(),
            JsonAction::Move(3, JsonDirection::LEFT)
        );
    }

    #[test]
    fn has_unique_elements_detects_duplicates() {
        let colors = vec![ColorName::Red.into(), ColorName::Blue.into()];
        assert!(has_unique_elements(&colors));
        let dup: Vec<Color> = vec![ColorName::Red.into(), ColorName::Red.into()];
        assert!(!has_unique_elements(&dup));
    }

    #[test]
    fn board_json_roundtrip() {
        let rows = vec![vec![Tile { connector: ConnectorShape::Crossroads, gems: Gem::pair_from_num(0) }; 2]; 2];
        let spare = Tile { connector: ConnectorShape::Crossroads, gems: Gem::pair_from_num(4) };
        let board = Board::new(Grid::from_rows(rows), spare.clone()).unwrap();
        let json = JsonBoard::from(&board);
        let rebuilt = json.into_board(spare).unwrap();
        assert_eq!(rebuilt, board);
    }
}
