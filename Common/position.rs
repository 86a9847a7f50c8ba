use serde::{Deserialize, Serialize};

/// A (row, col) location on a [`crate::grid::Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Squared Euclidean distance to `other`; avoids a sqrt since only relative ordering matters
    /// for `closest_to_victory`.
    pub fn squared_distance(self, other: Position) -> u64 {
        let dr = self.row as i64 - other.row as i64;
        let dc = self.col as i64 - other.col as i64;
        (dr * dr + dc * dc) as u64
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squared_distance_is_symmetric() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.squared_distance(b), 25);
        assert_eq!(a.squared_distance(b), b.squared_distance(a));
    }
}
