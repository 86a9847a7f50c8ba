use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use unordered_pair::UnorderedPair;

use crate::direction::Direction;
use crate::gem::Gem;
use crate::grid::Grid;
use crate::position::Position;
use crate::tile::Tile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must be at least 2x2")]
    TooSmall,
    #[error("slide index {0} is out of range")]
    InvalidIndex(usize),
    #[error("row/column index {0} is not slideable (must be even)")]
    InvalidSlide(usize),
    #[error("not enough distinct gem pairs to generate a board of this size")]
    InsufficientGems,
}

/// The effect of one slide: which surviving tiles moved where, which tile fell off, and where
/// the former spare entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTransition {
    pub updated: HashMap<Position, Position>,
    pub removed: Position,
    pub inserted: Position,
}

impl PositionTransition {
    /// Where a player standing at `from` ends up after this transition: tracked per `updated`,
    /// or wrapped to `inserted` if they were on the tile that fell off.
    pub fn transport(&self, from: Position) -> Position {
        if from == self.removed {
            self.inserted
        } else {
            self.updated.get(&from).copied().unwrap_or(from)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid<Tile>,
    spare: Tile,
}

impl Board {
    pub fn new(grid: Grid<Tile>, spare: Tile) -> Result<Self, BoardError> {
        if grid.rows() < 2 || grid.cols() < 2 {
            return Err(BoardError::TooSmall);
        }
        Ok(Self { grid, spare })
    }

    /// Generates a board with unique treasure pairs on every tile (including the spare) via the
    /// given RNG. `prohibited` gem pairs are never used (lets tests keep generated tiles
    /// distinguishable from pre-existing ones).
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        rng: &mut R,
        prohibited: &HashSet<UnorderedPair<Gem>>,
    ) -> Result<Self, BoardError> {
        if height < 2 || width < 2 {
            return Err(BoardError::TooSmall);
        }
        let needed = height * width + 1;
        let mut pairs = unique_gem_pairs(prohibited)?;
        if pairs.len() < needed {
            return Err(BoardError::InsufficientGems);
        }
        pairs.shuffle(rng);
        pairs.truncate(needed);

        let mut shapes: Vec<_> = (0..needed).map(crate::shape::ConnectorShape::from_num).collect();
        shapes.shuffle(rng);

        let mut tiles: Vec<Tile> = shapes
            .into_iter()
            .zip(pairs)
            .map(|(connector, gems)| Tile { connector, gems })
            .collect();
        let spare = tiles.pop().expect("needed >= 1");

        let mut iter = tiles.into_iter();
        let mut rows = Vec::with_capacity(height);
        for _ in 0..height {
            rows.push((&mut iter).take(width).collect());
        }
        Board::new(Grid::from_rows(rows), spare)
    }

    pub fn height(&self) -> usize {
        self.grid.rows()
    }

    pub fn width(&self) -> usize {
        self.grid.cols()
    }

    pub fn spare(&self) -> &Tile {
        &self.spare
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.grid.get(pos)
    }

    pub fn rotate_spare(&mut self, quarter_turns_clockwise: i32) {
        self.spare.rotate_by(quarter_turns_clockwise);
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height() && pos.col < self.width()
    }

    /// True iff `index` is a slideable row (for a horizontal direction) or column (for a
    /// vertical one): in range and even.
    pub fn is_slideable(&self, index: usize, direction: Direction) -> bool {
        let bound = if direction.is_horizontal() {
            self.height()
        } else {
            self.width()
        };
        index < bound && index % 2 == 0
    }

    /// True iff neither the row nor the column index is slideable; homes and goals are placed
    /// only on stationary cells so they are never disturbed by a slide.
    pub fn stationary(&self, row: usize, col: usize) -> bool {
        row % 2 == 1 && col % 2 == 1
    }

    pub fn all_stationary_positions(&self) -> Vec<Position> {
        self.grid
            .iter_positions()
            .filter(|p| self.stationary(p.row, p.col))
            .collect()
    }

    /// Slides row/column `index` one cell in `direction`, inserting the spare at the trailing
    /// edge and replacing it with the tile that fell off the leading edge. Fails, leaving the
    /// board unchanged, if `index` is out of range or not slideable.
    pub fn shift_insert(
        &mut self,
        index: usize,
        direction: Direction,
    ) -> Result<PositionTransition, BoardError> {
        let bound = if direction.is_horizontal() {
            self.height()
        } else {
            self.width()
        };
        if index >= bound {
            return Err(BoardError::InvalidIndex(index));
        }
        if index % 2 != 0 {
            return Err(BoardError::InvalidSlide(index));
        }

        let insert_tile = self.spare.clone();
        let (displaced, updated, removed, inserted) = match direction {
            Direction::Right => {
                let width = self.width();
                let displaced = self.grid.rotate_right(index, insert_tile);
                let updated = (0..width - 1)
                    .map(|c| (Position::new(index, c), Position::new(index, c + 1)))
                    .collect();
                (displaced, updated, Position::new(index, width - 1), Position::new(index, 0))
            }
            Direction::Left => {
                let width = self.width();
                let displaced = self.grid.rotate_left(index, insert_tile);
                let updated = (1..width)
                    .map(|c| (Position::new(index, c), Position::new(index, c - 1)))
                    .collect();
                (displaced, updated, Position::new(index, 0), Position::new(index, width - 1))
            }
            Direction::Down => {
                let height = self.height();
                let displaced = self.grid.rotate_down(index, insert_tile);
                let updated = (0..height - 1)
                    .map(|r| (Position::new(r, index), Position::new(r + 1, index)))
                    .collect();
                (displaced, updated, Position::new(height - 1, index), Position::new(0, index))
            }
            Direction::Up => {
                let height = self.height();
                let displaced = self.grid.rotate_up(index, insert_tile);
                let updated = (1..height)
                    .map(|r| (Position::new(r, index), Position::new(r - 1, index)))
                    .collect();
                (displaced, updated, Position::new(0, index), Position::new(height - 1, index))
            }
        };
        self.spare = displaced;
        Ok(PositionTransition { updated, removed, inserted })
    }

    fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.offset();
        let row = pos.row as isize + dr;
        let col = pos.col as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let candidate = Position::new(row as usize, col as usize);
        self.is_in_bounds(candidate).then_some(candidate)
    }

    /// The set of positions reachable from `from` by following edges whose shapes connect on
    /// both sides. Always includes `from` itself.
    pub fn reachable(&self, from: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        visited.insert(from);
        let mut stack = vec![from];
        while let Some(pos) = stack.pop() {
            let Some(tile) = self.grid.get(pos) else { continue };
            for direction in Direction::ALL {
                if !tile.connector.has(direction) {
                    continue;
                }
                let Some(neighbor) = self.neighbor(pos, direction) else { continue };
                if visited.contains(&neighbor) {
                    continue;
                }
                if let Some(neighbor_tile) = self.grid.get(neighbor) {
                    if neighbor_tile.connector.has(direction.opposite()) {
                        visited.insert(neighbor);
                        stack.push(neighbor);
                    }
                }
            }
        }
        visited
    }
}

fn unique_gem_pairs(prohibited: &HashSet<UnorderedPair<Gem>>) -> Result<Vec<UnorderedPair<Gem>>, BoardError> {
    let pairs: Vec<UnorderedPair<Gem>> = Gem::ALL
        .iter()
        .combinations(2)
        .map(|pair| (*pair[0], *pair[1]).into())
        .filter(|pair| !prohibited.contains(pair))
        .collect();
    if pairs.is_empty() {
        return Err(BoardError::InsufficientGems);
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ConnectorShape::*, PathOrientation::*};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn tile(connector: crate::shape::ConnectorShape, num: usize) -> Tile {
        Tile {
            connector,
            gems: Gem::pair_from_num(num),
        }
    }

    fn line_board() -> Board {
        // 3x3 board of all vertical paths, spare is a horizontal path.
        let rows = (0..3)
            .map(|r| (0..3).map(|c| tile(Path(Vertical), r * 3 + c)).collect())
            .collect();
        Board::new(Grid::from_rows(rows), tile(Path(Horizontal), 100)).unwrap()
    }

    #[test]
    fn rejects_undersized_board() {
        let rows = vec![vec![tile(Crossroads, 0)]];
        let err = Board::new(Grid::from_rows(rows), tile(Crossroads, 1)).unwrap_err();
        assert_eq!(err, BoardError::TooSmall);
    }

    #[test]
    fn shift_insert_rejects_odd_index() {
        let mut b = line_board();
        let err = b.shift_insert(1, Direction::Right).unwrap_err();
        assert_eq!(err, BoardError::InvalidSlide(1));
    }

    #[test]
    fn shift_insert_rejects_out_of_range_index() {
        let mut b = line_board();
        let err = b.shift_insert(4, Direction::Right).unwrap_err();
        assert_eq!(err, BoardError::InvalidIndex(4));
    }

    #[test]
    fn slide_then_reverse_restores_board_property_2() {
        let mut b = line_board();
        let original = b.clone();
        b.shift_insert(0, Direction::Right).unwrap();
        b.shift_insert(0, Direction::Left).unwrap();
        assert_eq!(b, original);
    }

    #[test]
    fn slide_then_reverse_restores_board_vertical() {
        let mut b = line_board();
        let original = b.clone();
        b.shift_insert(2, Direction::Down).unwrap();
        b.shift_insert(2, Direction::Up).unwrap();
        assert_eq!(b, original);
    }

    #[test]
    fn scenario_s3_player_transported_by_slide() {
        // 7-wide row; player at col 3 moves to col 4 on a RIGHT slide of row 0.
        let rows = (0..7)
            .map(|_| (0..7).map(|c| tile(Path(Vertical), c)).collect())
            .collect();
        let mut b = Board::new(Grid::from_rows(rows), tile(Path(Horizontal), 200)).unwrap();
        let transition = b.shift_insert(0, Direction::Right).unwrap();
        assert_eq!(transition.transport(Position::new(0, 3)), Position::new(0, 4));
        // Player at the trailing edge (col 6) wraps to the inserted position (col 0).
        assert_eq!(transition.transport(Position::new(0, 6)), Position::new(0, 0));
    }

    #[test]
    fn reachable_is_isolated_for_mismatched_neighbors_scenario_s4() {
        let mut rows = vec![vec![tile(Path(Horizontal), 0); 3]; 3];
        rows[1][1] = tile(Path(Vertical), 1);
        let isolated = Board::new(Grid::from_rows(rows), tile(Path(Horizontal), 99)).unwrap();
        let reached = isolated.reachable(Position::new(1, 1));
        assert_eq!(reached, HashSet::from([Position::new(1, 1)]));
    }

    #[test]
    fn reachable_is_reflexive_and_symmetric_property_1() {
        let rows = vec![vec![tile(Crossroads, 0); 3]; 3];
        let b = Board::new(Grid::from_rows(rows), tile(Crossroads, 9)).unwrap();
        for pos in b.grid().iter_positions() {
            assert!(b.reachable(pos).contains(&pos));
        }
        let from = Position::new(0, 0);
        let to = Position::new(0, 1);
        assert_eq!(b.reachable(from).contains(&to), b.reachable(to).contains(&from));
    }

    #[test]
    fn stationary_requires_both_indices_odd() {
        let b = line_board();
        assert!(b.stationary(1, 1));
        assert!(!b.stationary(0, 1));
        assert!(!b.stationary(1, 0));
    }

    #[test]
    fn random_board_has_unique_gem_pairs_including_spare() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let board = Board::random(3, 3, &mut rng, &HashSet::new()).unwrap();
        let mut seen = HashSet::new();
        for pos in board.grid().iter_positions() {
            assert!(seen.insert(board.tile_at(pos).unwrap().gems));
        }
        assert!(seen.insert(board.spare().gems));
    }

    #[test]
    fn random_board_rejects_undersized_request() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = Board::random(1, 5, &mut rng, &HashSet::new()).unwrap_err();
        assert_eq!(err, BoardError::TooSmall);
    }
}
