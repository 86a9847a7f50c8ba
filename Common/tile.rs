use unordered_pair::UnorderedPair;

use crate::direction::Direction;
use crate::gem::Gem;
use crate::shape::ConnectorShape;

/// A single tile on a board: a connector shape plus the two gems it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub connector: ConnectorShape,
    pub gems: UnorderedPair<Gem>,
}

impl Tile {
    /// Rotates the tile 90 degrees clockwise according to the symmetries of its `ConnectorShape`.
    pub fn rotate(&mut self) {
        self.connector = self.connector.rotate();
    }

    /// Rotates by a number of quarter turns clockwise; used to apply a degrees-mod-360 rotation.
    pub fn rotate_by(&mut self, quarter_turns: i32) {
        self.connector = self.connector.rotate_by(quarter_turns);
    }

    /// Checks if `self` can connect to `other` in the given [`Direction`].
    pub fn connected(&self, other: &Self, direction: Direction) -> bool {
        self.connector.connected(other.connector, direction)
    }

    pub fn from_num(num: usize) -> Tile {
        Self {
            connector: ConnectorShape::from_num(num),
            gems: Gem::pair_from_num(num),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{ConnectorShape::*, PathOrientation::*};
    use Direction::*;

    #[test]
    fn tile_rotate() {
        use Gem::*;
        let mut tile = Tile {
            connector: Fork(Up),
            gems: (amethyst, garnet).into(),
        };

        tile.rotate();
        assert_eq!(tile.connector, Fork(Right));
        tile.rotate();
        assert_eq!(tile.connector, Fork(Down));
        tile.rotate();
        assert_eq!(tile.connector, Fork(Left));
        tile.rotate();
        assert_eq!(tile.connector, Fork(Up));
    }

    #[test]
    fn tile_equality_ignores_gem_order() {
        use Gem::*;
        let a = Tile {
            connector: Path(Vertical),
            gems: (ruby, emerald).into(),
        };
        let b = Tile {
            connector: Path(Vertical),
            gems: (emerald, ruby).into(),
        };
        assert_eq!(a, b);
    }

    #[test]
    fn connected_wrapper_delegates_to_shape() {
        let gems = (Gem::amethyst, Gem::garnet);
        let a = Tile {
            connector: Crossroads,
            gems: gems.into(),
        };
        let b = Tile {
            connector: Crossroads,
            gems: gems.into(),
        };
        assert!(a.connected(&b, Up));
    }
}
