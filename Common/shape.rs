use crate::direction::Direction;

/// This enum describes the two orientations for [`ConnectorShape::Path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOrientation {
    Horizontal,
    Vertical,
}

/// The connectivity of a tile's four edges. Variants enumerate the eleven canonical connectors:
/// two straight paths, four corners, four forks, and one crossroads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorShape {
    /// ─ - Horizontal, │ - Vertical
    Path(PathOrientation),
    /// Direction is dictated by which way it turns right to.
    /// ┐ - Down, └ - Up, ┌ - Right, ┘ - Left
    Corner(Direction),
    /// Direction is dictated by the middle path.
    /// ┬ - Down, ┴ - Up, ├ - Right, ┤ - Left
    Fork(Direction),
    /// ┼, the same in every direction.
    Crossroads,
}

impl ConnectorShape {
    /// Rotates the shape 90 degrees clockwise, permuting the (top, right, bottom, left)
    /// connectivity by one position.
    #[must_use]
    pub fn rotate(self) -> Self {
        use ConnectorShape::*;
        use PathOrientation::*;
        match self {
            Path(Horizontal) => Path(Vertical),
            Path(Vertical) => Path(Horizontal),
            Corner(dir) => Corner(dir.rotate_clockwise()),
            Fork(dir) => Fork(dir.rotate_clockwise()),
            Crossroads => Crossroads,
        }
    }

    /// Rotates by `quarter_turns` quarter turns clockwise (negative allowed).
    pub fn rotate_by(self, quarter_turns: i32) -> Self {
        let steps = quarter_turns.rem_euclid(4);
        let mut shape = self;
        for _ in 0..steps {
            shape = shape.rotate();
        }
        shape
    }

    /// Can we go in this `direction` out of this shape?
    pub fn has(self, direction: Direction) -> bool {
        use ConnectorShape::*;
        use Direction::*;
        use PathOrientation::*;
        matches!(
            (self, direction),
            (Path(Vertical), Up | Down)
                | (Path(Horizontal), Right | Left)
                | (Corner(Up), Up | Right)
                | (Corner(Down), Down | Left)
                | (Corner(Right), Right | Down)
                | (Corner(Left), Left | Up)
                | (Fork(Up), Up | Right | Left)
                | (Fork(Down), Down | Right | Left)
                | (Fork(Right), Right | Up | Down)
                | (Fork(Left), Left | Up | Down)
                | (Crossroads, _)
        )
    }

    /// Checks if `self` can connect to `other` in the given [`Direction`]: `self` must open
    /// towards `direction` and `other` must open towards its opposite.
    pub fn connected(self, other: Self, direction: Direction) -> bool {
        self.has(direction) && other.has(direction.opposite())
    }

    /// The unrotated shape fixed by each of the eleven box-drawing connector characters, in a
    /// stable enumeration order used for deterministic board generation.
    pub fn from_num(num: usize) -> Self {
        use ConnectorShape::*;
        use Direction::*;
        use PathOrientation::*;
        match num % 11 {
            0 => Path(Horizontal),
            1 => Path(Vertical),
            2 => Corner(Up),
            3 => Corner(Right),
            4 => Corner(Down),
            5 => Corner(Left),
            6 => Fork(Up),
            7 => Fork(Right),
            8 => Fork(Down),
            9 => Fork(Left),
            10 => Crossroads,
            _ => unreachable!("usize % 11 is never > 10"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConnectorShape::*;
    use Direction::*;
    use PathOrientation::*;

    #[test]
    fn connector_rotate() {
        assert_eq!(Crossroads.rotate(), Crossroads);
        assert_eq!(Crossroads.rotate().rotate(), Crossroads);

        assert_eq!(Path(Vertical).rotate(), Path(Horizontal));
        assert_eq!(Path(Vertical).rotate().rotate(), Path(Vertical));

        assert_eq!(Corner(Up).rotate(), Corner(Right));
        assert_eq!(Corner(Up).rotate().rotate(), Corner(Down));
        assert_eq!(Corner(Up).rotate().rotate().rotate(), Corner(Left));
        assert_eq!(Corner(Up).rotate().rotate().rotate().rotate(), Corner(Up));
    }

    #[test]
    fn rotate_by_four_is_identity() {
        for k in 0..3 {
            assert_eq!(Fork(Right).rotate_by(4 * k), Fork(Right));
        }
    }

    #[test]
    fn spare_rotation_scenario_s2() {
        // S2: spare │ -> rotate_spare(90) -> ─ -> rotate_spare(270) -> │
        let spare = Path(Vertical);
        let after_90 = spare.rotate_by(1);
        assert_eq!(after_90, Path(Horizontal));
        let after_270 = after_90.rotate_by(3);
        assert_eq!(after_270, Path(Vertical));
    }

    #[test]
    fn test_has() {
        assert!(Crossroads.has(Up));
        assert!(Crossroads.has(Down));
        assert!(Crossroads.has(Right));
        assert!(Crossroads.has(Left));

        assert!(Path(Vertical).has(Up));
        assert!(Path(Vertical).has(Down));
        assert!(!Path(Vertical).has(Right));
        assert!(Path(Horizontal).has(Right));
        assert!(!Path(Horizontal).has(Up));

        assert!(Fork(Up).has(Up));
        assert!(Fork(Up).has(Right));
        assert!(Fork(Up).has(Left));
        assert!(!Fork(Up).has(Down));
    }

    #[test]
    fn test_connected() {
        assert!(Crossroads.connected(Crossroads, Up));
        assert!(!Path(Vertical).connected(Path(Horizontal), Up));
        assert!(Path(Vertical).connected(Path(Vertical), Up));
        assert!(!Path(Vertical).connected(Path(Vertical), Right));
        assert!(Fork(Up).connected(Fork(Down), Up));
        assert!(!Fork(Up).connected(Fork(Down), Down));
    }

    #[test]
    fn reachability_scenario_s4() {
        // S4: an isolated │ tile surrounded by ─ tiles has no matching edges in any direction.
        let center = Path(Vertical);
        let neighbor = Path(Horizontal);
        for d in Direction::ALL {
            assert!(!center.connected(neighbor, d));
        }
    }
}
