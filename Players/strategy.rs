use common::board::Board;
use common::direction::Direction;
use common::position::Position;

/// Everything a `Strategy` needs to decide a move: the board, every player's current position
/// (the strategy's own position is `player_positions[0]` by convention), and the most recent
/// non-pass slide, which a legal move must not exactly undo.
#[derive(Debug, Clone)]
pub struct PlayerBoardState {
    pub board: Board,
    pub player_positions: Vec<Position>,
    pub last_move: Option<(usize, Direction)>,
}

/// A pure decision function: given the board state, where the strategy's player currently
/// stands, and the goal to reach, choose a move or pass.
pub trait Strategy {
    fn get_move(&self, board_state: PlayerBoardState, start: Position, goal_tile: Position) -> PlayerMove;
}

/// A chosen move, or the decision not to move this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerMove {
    Pass,
    Move {
        slide_index: usize,
        slide_direction: Direction,
        /// Quarter turns clockwise to rotate the spare before sliding it in.
        rotations: usize,
        destination: Position,
    },
}

/// The two brute-force reference strategies: try every slide, at every rotation, in a fixed
/// preference order, until the goal is reached; failing that, fall back to the nearest
/// alternative goal reachable by the same search, ordered either by Euclidean proximity
/// (`Euclid`) or by a column-major scan of the board (`Riemann`).
#[derive(Debug, Clone, Copy)]
pub enum NaiveStrategy {
    Euclid,
    Riemann,
}

impl NaiveStrategy {
    fn try_move(
        board_state: &PlayerBoardState,
        index: usize,
        direction: Direction,
        rotations: usize,
        start: Position,
        destination: Position,
    ) -> bool {
        if board_state.last_move == Some((index, direction.opposite())) {
            return false;
        }
        let mut board = board_state.board.clone();
        board.rotate_spare(rotations as i32);
        let Ok(transition) = board.shift_insert(index, direction) else {
            return false;
        };
        let moved_start = transition.transport(start);
        board.reachable(moved_start).contains(&destination)
    }

    fn find_move_to_reach(board_state: &PlayerBoardState, start: Position, destination: Position) -> PlayerMove {
        let height = board_state.board.height();
        let width = board_state.board.width();

        for slide_index in (0..height).step_by(2) {
            for slide_direction in [Direction::Left, Direction::Right] {
                for rotations in 0..4 {
                    if Self::try_move(board_state, slide_index, slide_direction, rotations, start, destination) {
                        return PlayerMove::Move { slide_index, slide_direction, rotations, destination };
                    }
                }
            }
        }
        for slide_index in (0..width).step_by(2) {
            for slide_direction in [Direction::Up, Direction::Down] {
                for rotations in 0..4 {
                    if Self::try_move(board_state, slide_index, slide_direction, rotations, start, destination) {
                        return PlayerMove::Move { slide_index, slide_direction, rotations, destination };
                    }
                }
            }
        }
        PlayerMove::Pass
    }

    /// Candidate alternative goals, ordered by this strategy's preference.
    fn alternate_goals(&self, board_state: &PlayerBoardState, start: Position) -> Vec<Position> {
        let mut candidates: Vec<Position> =
            board_state.board.all_stationary_positions().into_iter().filter(|p| *p != start).collect();
        match self {
            NaiveStrategy::Euclid => candidates.sort_by_key(|p| p.squared_distance(start)),
            NaiveStrategy::Riemann => candidates.sort_by(|a, b| a.col.cmp(&b.col).then(a.row.cmp(&b.row))),
        }
        candidates
    }

    fn find_move_to_reach_alt_goal(&self, board_state: &PlayerBoardState, start: Position) -> PlayerMove {
        for alt_goal in self.alternate_goals(board_state, start) {
            match Self::find_move_to_reach(board_state, start, alt_goal) {
                PlayerMove::Pass => {}
                found => return found,
            }
        }
        PlayerMove::Pass
    }
}

impl Strategy for NaiveStrategy {
    fn get_move(&self, board_state: PlayerBoardState, start: Position, goal_tile: Position) -> PlayerMove {
        match Self::find_move_to_reach(&board_state, start, goal_tile) {
            PlayerMove::Pass => self.find_move_to_reach_alt_goal(&board_state, start),
            found => found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::gem::Gem;
    use common::grid::Grid;
    use common::shape::ConnectorShape::*;
    use common::tile::Tile;

    fn tile(connector: common::shape::ConnectorShape, num: usize) -> Tile {
        Tile { connector, gems: Gem::pair_from_num(num) }
    }

    fn crossroads_board(size: usize) -> Board {
        let rows = vec![vec![tile(Crossroads, 0); size]; size];
        Board::new(Grid::from_rows(rows), tile(Crossroads, size * size)).unwrap()
    }

    #[test]
    fn reaches_goal_without_needing_to_slide() {
        let board = crossroads_board(5);
        let state = PlayerBoardState { board, player_positions: vec![Position::new(1, 1)], last_move: None };
        let result = NaiveStrategy::Euclid.get_move(state, Position::new(1, 1), Position::new(3, 3));
        match result {
            PlayerMove::Move { destination, .. } => assert_eq!(destination, Position::new(3, 3)),
            PlayerMove::Pass => panic!("goal is reachable without a slide on an all-crossroads board"),
        }
    }

    #[test]
    fn passes_when_goal_is_unreachable_on_an_isolated_board() {
        let mut rows = vec![vec![tile(Path(common::shape::PathOrientation::Horizontal), 0); 3]; 3];
        rows[1][1] = tile(Path(common::shape::PathOrientation::Vertical), 1);
        let board = Board::new(Grid::from_rows(rows), tile(Crossroads, 9)).unwrap();
        let state = PlayerBoardState { board, player_positions: vec![Position::new(1, 1)], last_move: None };
        let result = NaiveStrategy::Riemann.get_move(state, Position::new(1, 1), Position::new(0, 0));
        assert_eq!(result, PlayerMove::Pass);
    }

    #[test]
    fn never_proposes_the_exact_reversal_of_the_last_slide() {
        let board = crossroads_board(5);
        let state = PlayerBoardState {
            board,
            player_positions: vec![Position::new(1, 1)],
            last_move: Some((0, Direction::Left)),
        };
        let result = NaiveStrategy::Euclid.get_move(state, Position::new(1, 1), Position::new(3, 3));
        match result {
            PlayerMove::Move { slide_index, slide_direction, .. } => {
                assert!(!(slide_index == 0 && slide_direction == Direction::Right));
            }
            PlayerMove::Pass => {}
        }
    }
}
