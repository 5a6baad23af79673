//! Tilt directions and their vector algebra

use serde::{Deserialize, Serialize};

/// A direction the board can be tilted toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    North,
    South,
    East,
    West,
}

/// All four sides, for iteration.
pub const ALL_SIDES: [Side; 4] = [Side::North, Side::South, Side::East, Side::West];

impl Side {
    /// Unit step vector `(dcol, drow)` pointing toward this side.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Side::North => (0, 1),
            Side::South => (0, -1),
            Side::East => (1, 0),
            Side::West => (-1, 0),
        }
    }

    /// The side opposite this one.
    pub const fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::South => Side::North,
            Side::East => Side::West,
            Side::West => Side::East,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for side in ALL_SIDES {
            assert_eq!(side.opposite().opposite(), side);
            assert_ne!(side.opposite(), side);
        }
    }

    #[test]
    fn test_opposite_deltas_cancel() {
        for side in ALL_SIDES {
            let (dcol, drow) = side.delta();
            let (ocol, orow) = side.opposite().delta();
            assert_eq!(dcol + ocol, 0);
            assert_eq!(drow + orow, 0);
        }
    }
}
