use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::net::TcpStream;

use common::board::Board;
use common::name::Name;
use common::position::Position;
use common::state::RedactedState;
use players::player::{PlayerApi, PlayerApiError, PlayerApiResult};
use players::strategy::PlayerMove;
use serde::Deserialize;
use serde_json::de::IoRead;

use crate::json::{JsonFunctionCall, JsonResult};
use crate::stream::{ReadableStreamWrapper, StreamCloser};

/// Stands in for a player connected over a socket: every [`PlayerApi`] call is translated into a
/// `JsonFunctionCall`, written out, and answered by reading back a `JsonResult`.
pub struct PlayerProxy<In: Read + Send, Out: Write + Send> {
    name: Name,
    r#in: RefCell<serde_json::Deserializer<IoRead<In>>>,
    out: RefCell<Out>,
    closer: Option<StreamCloser>,
}

impl PlayerProxy<ReadableStreamWrapper, TcpStream> {
    /// Builds a proxy over a live connection. The read side polls in short bursts so an
    /// ejection's `close()` call (see [`PlayerProxy::close`]) unblocks a pending read promptly
    /// instead of waiting out a long deadline.
    pub fn try_from_tcp(name: Name, stream: TcpStream) -> io::Result<Self> {
        let out = RefCell::new(stream.try_clone()?);
        let wrapper = ReadableStreamWrapper::new(stream)?;
        let closer = wrapper.closer();
        Ok(Self {
            name,
            out,
            r#in: RefCell::new(serde_json::Deserializer::from_reader(wrapper)),
            closer: Some(closer),
        })
    }
}

impl<In: Read + Send, Out: Write + Send> PlayerProxy<In, Out> {
    pub fn new(name: Name, r#in: In, out: Out) -> Self {
        Self {
            name,
            out: RefCell::new(out),
            r#in: RefCell::new(serde_json::Deserializer::from_reader(r#in)),
            closer: None,
        }
    }

    /// Shuts down the underlying socket, if this proxy was built over one. Wired to
    /// [`players::referee::player::SafePlayer::with_ejection_hook`] so a kicked remote player's
    /// connection is torn down promptly instead of lingering until the process exits.
    pub fn close(&self) {
        if let Some(closer) = &self.closer {
            closer.close();
        }
    }

    /// Returns an independent handle that can close this proxy's socket, for attaching as a
    /// `SafePlayer` ejection hook after this proxy has been boxed into a `dyn PlayerApi`.
    pub fn try_closer(&self) -> Option<StreamCloser> {
        self.closer.as_ref().and_then(|c| c.try_clone().ok())
    }

    fn read_result(&self) -> PlayerApiResult<JsonResult> {
        JsonResult::deserialize(&mut *self.r#in.borrow_mut())
            .map_err(|e| PlayerApiError::Other(e.into()))
    }

    fn send_function_call(&self, func: &JsonFunctionCall) -> PlayerApiResult<()> {
        let msg = serde_json::to_string(func).map_err(|e| PlayerApiError::Other(e.into()))?;
        self.out.borrow_mut().write_all(msg.as_bytes()).map_err(|e| PlayerApiError::Other(e.into()))?;
        self.out.borrow_mut().write_all(b" ").map_err(|e| PlayerApiError::Other(e.into()))?;
        Ok(())
    }
}

impl<In: Read + Send, Out: Write + Send> PlayerApi for PlayerProxy<In, Out> {
    fn name(&self) -> PlayerApiResult<Name> {
        Ok(self.name.clone())
    }

    fn propose_board0(&self, cols: u32, rows: u32) -> PlayerApiResult<Board> {
        self.send_function_call(&JsonFunctionCall::propose_board0(cols, rows))?;
        match self.read_result()? {
            JsonResult::Board(board) => {
                board.into_board().map_err(|e| PlayerApiError::Other(e.into()))
            }
            _ => Err(PlayerApiError::Other(anyhow::anyhow!("expected a board from proposeBoard0"))),
        }
    }

    fn setup(&mut self, state: Option<RedactedState>, goal: Position) -> PlayerApiResult<()> {
        self.send_function_call(&JsonFunctionCall::setup(state.as_ref(), goal))?;
        match self.read_result()? {
            JsonResult::Void => Ok(()),
            _ => Err(PlayerApiError::Other(anyhow::anyhow!("expected \"void\" from setUp"))),
        }
    }

    fn take_turn(&self, state: RedactedState) -> PlayerApiResult<PlayerMove> {
        self.send_function_call(&JsonFunctionCall::take_turn(&state))?;
        match self.read_result()? {
            JsonResult::Choice(choice) => {
                choice.into_move().map_err(|e| PlayerApiError::Other(e.into()))
            }
            _ => Err(PlayerApiError::Other(anyhow::anyhow!("expected a move from takeTurn"))),
        }
    }

    fn won(&mut self, did_win: bool) -> PlayerApiResult<()> {
        self.send_function_call(&JsonFunctionCall::win(did_win))?;
        match self.read_result()? {
            JsonResult::Void => Ok(()),
            _ => Err(PlayerApiError::Other(anyhow::anyhow!("expected \"void\" from win"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::color::Color;
    use common::gem::Gem;
    use common::grid::Grid;
    use common::player_details::PlayerDetails;
    use common::shape::ConnectorShape::Crossroads;
    use common::tile::Tile;
    use players::json::JsonChoice;

    fn crossroads_board(size: usize) -> Board {
        let tile = Tile { connector: Crossroads, gems: Gem::pair_from_num(0) };
        let rows = vec![vec![tile.clone(); size]; size];
        Board::new(Grid::from_rows(rows), tile).unwrap()
    }

    #[test]
    fn name_returns_the_locally_known_name_without_a_network_round_trip() {
        let player = PlayerProxy::new(Name::new("john").unwrap(), "".as_bytes(), Vec::new());
        assert_eq!(player.name().unwrap(), Name::new("john").unwrap());
    }

    #[test]
    fn setup_sends_a_call_and_reads_an_ack() {
        let mut player = PlayerProxy::new(Name::new("joe").unwrap(), "\"void\" ".as_bytes(), Vec::new());
        assert!(player.setup(None, Position::new(1, 2)).is_ok());
    }

    #[test]
    fn setup_with_no_response_is_an_error() {
        let mut player = PlayerProxy::new(Name::new("joe").unwrap(), "".as_bytes(), Vec::new());
        assert!(player.setup(None, Position::new(0, 0)).is_err());
    }

    #[test]
    fn take_turn_reads_back_a_move() {
        let choice = serde_json::to_string(&JsonChoice::Pass).unwrap();
        let player = PlayerProxy::new(Name::new("joe").unwrap(), choice.as_bytes(), Vec::new());
        let state = RedactedState {
            board: crossroads_board(3),
            history: vec![],
            players: vec![PlayerDetails::new(Position::new(0, 0), Color::default())],
            active_index: 0,
        };
        assert_eq!(player.take_turn(state).unwrap(), PlayerMove::Pass);
    }

    #[test]
    fn take_turn_with_a_malformed_response_is_an_error() {
        let player = PlayerProxy::new(Name::new("joe").unwrap(), "not json".as_bytes(), Vec::new());
        let state = RedactedState {
            board: crossroads_board(3),
            history: vec![],
            players: vec![PlayerDetails::new(Position::new(0, 0), Color::default())],
            active_index: 0,
        };
        assert!(player.take_turn(state).is_err());
    }

    #[test]
    fn won_sends_the_outcome_and_reads_an_ack() {
        let mut player = PlayerProxy::new(Name::new("joe").unwrap(), "\"void\" ".as_bytes(), Vec::new());
        assert!(player.won(true).is_ok());
    }
}
