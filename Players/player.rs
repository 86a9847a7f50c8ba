use std::collections::HashSet;

use anyhow::anyhow;
use common::board::Board;
use common::name::Name;
use common::position::Position;
use common::state::RedactedState;
use thiserror::Error;

use crate::strategy::{PlayerBoardState, PlayerMove, Strategy};

/// Every way a call into a player can fail: it timed out on the safe adapter's clock, or
/// anything else went wrong (disconnect, malformed JSON, a panic caught at the boundary).
#[derive(Debug, Error)]
pub enum PlayerApiError {
    #[error("player timed out")]
    Timeout,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PlayerApiResult<T> = Result<T, PlayerApiError>;

/// The referee-facing surface of a player: a local AI, a remote proxy, or an intentionally
/// misbehaving test double all implement this. Every method is fallible because a remote
/// player can fail or vanish at any call site.
pub trait PlayerApi: Send {
    fn name(&self) -> PlayerApiResult<Name>;
    fn propose_board0(&self, cols: u32, rows: u32) -> PlayerApiResult<Board>;
    /// `state` is `None` on every setup after the first: the player already has the board, only
    /// the goal is new.
    fn setup(&mut self, state: Option<RedactedState>, goal: Position) -> PlayerApiResult<()>;
    fn take_turn(&self, state: RedactedState) -> PlayerApiResult<PlayerMove>;
    fn won(&mut self, did_win: bool) -> PlayerApiResult<()>;
}

/// An in-process AI player: a name and a pluggable [`Strategy`].
pub struct LocalPlayer<S: Strategy> {
    name: Name,
    strategy: S,
    goal: Option<Position>,
}

impl<S: Strategy> LocalPlayer<S> {
    pub fn new(name: Name, strategy: S) -> Self {
        Self { name, strategy, goal: None }
    }
}

impl<S: Strategy + Send> PlayerApi for LocalPlayer<S> {
    fn name(&self) -> PlayerApiResult<Name> {
        Ok(self.name.clone())
    }

    fn propose_board0(&self, cols: u32, rows: u32) -> PlayerApiResult<Board> {
        let mut rng = rand::thread_rng();
        Board::random(rows.max(2) as usize, cols.max(2) as usize, &mut rng, &HashSet::new())
            .map_err(|e| PlayerApiError::Other(e.into()))
    }

    fn setup(&mut self, _state: Option<RedactedState>, goal: Position) -> PlayerApiResult<()> {
        self.goal = Some(goal);
        Ok(())
    }

    fn take_turn(&self, state: RedactedState) -> PlayerApiResult<PlayerMove> {
        let start = state
            .players
            .first()
            .map(|p| p.current)
            .ok_or_else(|| PlayerApiError::Other(anyhow!("setup broadcast sent an empty player list")))?;
        let goal = self
            .goal
            .ok_or_else(|| PlayerApiError::Other(anyhow!("take_turn called before setup")))?;
        let board_state = PlayerBoardState {
            board: state.board,
            player_positions: state.players.iter().map(|p| p.current).collect(),
            last_move: state.history.last().copied(),
        };
        Ok(self.strategy.get_move(board_state, start, goal))
    }

    fn won(&mut self, _did_win: bool) -> PlayerApiResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::color::Color;
    use common::gem::Gem;
    use common::grid::Grid;
    use common::shape::ConnectorShape;
    use common::tile::Tile;
    use crate::strategy::NaiveStrategy;

    fn crossroads_board(size: usize) -> Board {
        let tile = Tile { connector: ConnectorShape::Crossroads, gems: Gem::pair_from_num(0) };
        let rows = vec![vec![tile.clone(); size]; size];
        Board::new(Grid::from_rows(rows), tile).unwrap()
    }

    #[test]
    fn take_turn_before_setup_is_an_error() {
        let player = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        let state = RedactedState {
            board: crossroads_board(3),
            history: vec![],
            players: vec![common::player_details::PlayerDetails::new(Position::new(1, 1), Color::default())],
            active_index: 0,
        };
        assert!(player.take_turn(state).is_err());
    }

    #[test]
    fn setup_then_take_turn_moves_toward_goal() {
        let mut player = LocalPlayer::new(Name::new("bob").unwrap(), NaiveStrategy::Euclid);
        player.setup(None, Position::new(3, 3)).unwrap();
        let state = RedactedState {
            board: crossroads_board(5),
            history: vec![],
            players: vec![common::player_details::PlayerDetails::new(Position::new(1, 1), Color::default())],
            active_index: 0,
        };
        let result = player.take_turn(state).unwrap();
        match result {
            PlayerMove::Move { destination, .. } => assert_eq!(destination, Position::new(3, 3)),
            PlayerMove::Pass => panic!("goal should be reachable with no slide needed"),
        }
    }
}
