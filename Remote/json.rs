//! Wire shapes for the duplex call/response protocol between a referee and a remote player:
//! method names, arguments, and results, plus the board shape `proposeBoard0` hands back.

use common::board::Board;
use common::json::{JsonBoard, JsonState, JsonTile};
use common::position::Position;
use common::state::RedactedState;
use players::json::JsonChoice;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::ProtocolError;

/// The wire name of every method a referee calls on a remote player through this call/response
/// channel. Each variant's rename is the literal wire string; these are camelCase, not the
/// `kebab-case` a blanket rename would produce. `name` isn't a variant here: it is only ever
/// exchanged once, as a bare string during the signup handshake, never wrapped in a
/// [`JsonFunctionCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum JsonMName {
    #[serde(rename = "setUp")]
    Setup,
    #[serde(rename = "takeTurn")]
    TakeTurn,
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "proposeBoard0")]
    ProposeBoard0,
}

/// The board shape handed back by `proposeBoard0`: a grid plus the spare tile that travels with
/// it, since [`Board`] itself has no direct wire serialization (it always needs its spare
/// supplied alongside the grid, as in [`JsonState`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonProposedBoard {
    pub board: JsonBoard,
    pub spare: JsonTile,
}

impl From<&Board> for JsonProposedBoard {
    fn from(board: &Board) -> Self {
        JsonProposedBoard { board: board.into(), spare: board.spare().into() }
    }
}

impl JsonProposedBoard {
    pub fn into_board(self) -> Result<Board, common::json::JsonBoardError> {
        self.board.into_board(self.spare.into())
    }
}

/// Any argument a referee method call carries. `rows`/`cols` travel as two bare JSON numbers
/// rather than this enum (see [`JsonFunctionCall::propose_board0`]), since `proposeBoard0` is the
/// only call whose argument list isn't homogeneous.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JsonArguments {
    State(JsonState),
    StateOrFalse(Option<JsonState>),
    Coordinate(common::json::Coordinate),
    Boolean(bool),
    Number(u32),
}

impl<'de> Deserialize<'de> for JsonArguments {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Bool(false) | serde_json::Value::Null => Ok(JsonArguments::StateOrFalse(None)),
            serde_json::Value::Bool(b) => Ok(JsonArguments::Boolean(*b)),
            serde_json::Value::Number(_) => {
                serde_json::from_value(value).map(JsonArguments::Number).map_err(de::Error::custom)
            }
            serde_json::Value::Object(_) => {
                if value.get("row#").is_some() {
                    serde_json::from_value(value).map(JsonArguments::Coordinate).map_err(de::Error::custom)
                } else {
                    serde_json::from_value(value).map(JsonArguments::State).map_err(de::Error::custom)
                }
            }
            _ => Err(de::Error::custom("unrecognized argument shape")),
        }
    }
}

impl From<Option<&RedactedState>> for JsonArguments {
    fn from(state: Option<&RedactedState>) -> Self {
        JsonArguments::StateOrFalse(state.map(JsonState::from))
    }
}

impl From<&RedactedState> for JsonArguments {
    fn from(state: &RedactedState) -> Self {
        JsonArguments::State(state.into())
    }
}

impl From<Position> for JsonArguments {
    fn from(pos: Position) -> Self {
        JsonArguments::Coordinate(pos.into())
    }
}

impl From<bool> for JsonArguments {
    fn from(b: bool) -> Self {
        JsonArguments::Boolean(b)
    }
}

/// The bare JSON value a remote player sends back. `"void"` acknowledges `setUp`/`win`;
/// `JsonChoice` answers `takeTurn`; `JsonProposedBoard` answers `proposeBoard0`.
#[derive(Debug)]
pub enum JsonResult {
    Void,
    Choice(JsonChoice),
    Board(JsonProposedBoard),
}

impl<'de> Deserialize<'de> for JsonResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value == serde_json::json!("void") {
            return Ok(JsonResult::Void);
        }
        if let Ok(board) = serde_json::from_value::<JsonProposedBoard>(value.clone()) {
            return Ok(JsonResult::Board(board));
        }
        serde_json::from_value(value).map(JsonResult::Choice).map_err(de::Error::custom)
    }
}

impl Serialize for JsonResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            JsonResult::Void => "void".serialize(serializer),
            JsonResult::Choice(choice) => choice.serialize(serializer),
            JsonResult::Board(board) => board.serialize(serializer),
        }
    }
}

/// One call-and-arguments pair: `[method_name, [arg0, arg1, ...]]` on the wire.
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonFunctionCall(pub JsonMName, pub Vec<JsonArguments>);

impl JsonFunctionCall {
    pub fn setup(state: Option<&RedactedState>, goal: Position) -> Self {
        Self(JsonMName::Setup, vec![JsonArguments::from(state), goal.into()])
    }

    pub fn take_turn(state: &RedactedState) -> Self {
        Self(JsonMName::TakeTurn, vec![state.into()])
    }

    pub fn win(did_win: bool) -> Self {
        Self(JsonMName::Win, vec![did_win.into()])
    }

    pub fn propose_board0(cols: u32, rows: u32) -> Self {
        Self(JsonMName::ProposeBoard0, vec![JsonArguments::Number(rows), JsonArguments::Number(cols)])
    }

    /// Extracts the trailing `(state_or_false, goal)` pair a `setUp` call carries, consuming
    /// `self`'s argument list back-to-front (mirroring the order they were pushed in).
    pub fn into_setup_args(mut self) -> Result<(Option<RedactedState>, Position), ProtocolError> {
        let goal = match self.1.pop() {
            Some(JsonArguments::Coordinate(c)) => c.into(),
            _ => return Err(ProtocolError::UnexpectedArguments { expected: "a goal coordinate" }),
        };
        let state = match self.1.pop() {
            Some(JsonArguments::StateOrFalse(None)) => None,
            Some(JsonArguments::State(s)) => Some(s.try_into()?),
            _ => return Err(ProtocolError::UnexpectedArguments { expected: "a state or false" }),
        };
        Ok((state, goal))
    }

    pub fn into_take_turn_args(mut self) -> Result<RedactedState, ProtocolError> {
        match self.1.pop() {
            Some(JsonArguments::State(s)) => Ok(s.try_into()?),
            _ => Err(ProtocolError::UnexpectedArguments { expected: "a state" }),
        }
    }

    pub fn into_win_args(mut self) -> Result<bool, ProtocolError> {
        match self.1.pop() {
            Some(JsonArguments::Boolean(b)) => Ok(b),
            _ => Err(ProtocolError::UnexpectedArguments { expected: "a boolean" }),
        }
    }

    /// Returns `(cols, rows)`, matching [`players::player::PlayerApi::propose_board0`]'s argument
    /// order (the wire sends `[rows, cols]`, so this pops in the reverse of push order).
    pub fn into_propose_board0_args(mut self) -> Result<(u32, u32), ProtocolError> {
        let cols = match self.1.pop() {
            Some(JsonArguments::Number(n)) => n,
            _ => return Err(ProtocolError::UnexpectedArguments { expected: "a column count" }),
        };
        let rows = match self.1.pop() {
            Some(JsonArguments::Number(n)) => n,
            _ => return Err(ProtocolError::UnexpectedArguments { expected: "a row count" }),
        };
        Ok((cols, rows))
    }
}

impl From<common::json::JsonBoardError> for ProtocolError {
    fn from(_: common::json::JsonBoardError) -> Self {
        ProtocolError::UnexpectedArguments { expected: "a well-formed board" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::color::Color;
    use common::player_details::PlayerDetails;

    #[test]
    fn method_names_serialize_to_the_wire_spelling() {
        assert_eq!(serde_json::to_string(&JsonMName::Setup).unwrap(), "\"setUp\"");
        assert_eq!(serde_json::to_string(&JsonMName::TakeTurn).unwrap(), "\"takeTurn\"");
        assert_eq!(serde_json::to_string(&JsonMName::ProposeBoard0).unwrap(), "\"proposeBoard0\"");
    }

    #[test]
    fn setup_call_round_trips_its_arguments() {
        let state = RedactedState {
            board: crossroads_board(),
            history: vec![],
            players: vec![PlayerDetails::new(Position::new(0, 0), Color::default())],
            active_index: 0,
        };
        let call = JsonFunctionCall::setup(Some(&state), Position::new(1, 1));
        let json = serde_json::to_string(&call).unwrap();
        let parsed: JsonFunctionCall = serde_json::from_str(&json).unwrap();
        let (parsed_state, goal) = parsed.into_setup_args().unwrap();
        assert_eq!(goal, Position::new(1, 1));
        assert!(parsed_state.is_some());
    }

    #[test]
    fn setup_call_with_no_state_round_trips_as_false() {
        let call = JsonFunctionCall::setup(None, Position::new(0, 0));
        let json = serde_json::to_string(&call).unwrap();
        let parsed: JsonFunctionCall = serde_json::from_str(&json).unwrap();
        let (state, _) = parsed.into_setup_args().unwrap();
        assert!(state.is_none());
    }

    #[test]
    fn void_result_round_trips() {
        let json = serde_json::to_string(&JsonResult::Void).unwrap();
        assert_eq!(json, "\"void\"");
        let parsed: JsonResult = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, JsonResult::Void));
    }

    fn crossroads_board() -> Board {
        use common::gem::Gem;
        use common::grid::Grid;
        use common::shape::ConnectorShape::Crossroads;
        use common::tile::Tile;
        let tile = Tile { connector: Crossroads, gems: Gem::pair_from_num(0) };
        Board::new(Grid::from_rows(vec![vec![tile.clone(); 3]; 3]), tile).unwrap()
    }
}
