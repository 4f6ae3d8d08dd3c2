//! Offset-coordinate hex geometry.
//!
//! Rows are stacked vertically and every odd row is shifted half a tile to
//! the right (the level format marks those rows with a leading `|`). A tile
//! therefore touches two tiles in the row above and two in the row below,
//! and which columns those are depends on the parity of its own row.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A position on the hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 = top).
    pub row: usize,
    /// Column index inside the row.
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate sits on a shifted (odd) row.
    #[must_use]
    pub const fn is_odd_row(&self) -> bool {
        self.row % 2 == 1
    }

    /// The neighbouring coordinate across the given edge.
    ///
    /// Returns `None` when the neighbour would have a negative component.
    /// The high side is not checked here; the caller bounds-checks against
    /// the actual row lengths.
    #[must_use]
    pub fn neighbor(&self, direction: HexDirection) -> Option<Coord> {
        let (row_delta, col_delta) = direction.offset(self.is_odd_row());
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        Some(Coord::new(row, col))
    }

    /// All neighbouring coordinates with no negative component.
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count, ordered
    /// clockwise starting from the top-right edge.
    #[must_use]
    #[inline]
    pub fn neighbors(&self) -> ([Coord; 6], u8) {
        let mut result = [Coord::new(0, 0); 6];
        let mut count = 0u8;

        for direction in HexDirection::ALL {
            if let Some(coord) = self.neighbor(direction) {
                result[count as usize] = coord;
                count += 1;
            }
        }

        (result, count)
    }

    /// Whether `other` shares an edge with this coordinate.
    #[must_use]
    pub fn is_adjacent(&self, other: Coord) -> bool {
        let (adj, count) = self.neighbors();
        adj[..count as usize].contains(&other)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The six edges of a hex tile, ordered clockwise starting from top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HexDirection {
    /// Upper-right edge.
    TopRight = 0,
    /// Right edge.
    Right = 1,
    /// Lower-right edge.
    BottomRight = 2,
    /// Lower-left edge.
    BottomLeft = 3,
    /// Left edge.
    Left = 4,
    /// Upper-left edge.
    TopLeft = 5,
}

impl HexDirection {
    /// Every direction, clockwise from top-right.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::TopRight,
        HexDirection::Right,
        HexDirection::BottomRight,
        HexDirection::BottomLeft,
        HexDirection::Left,
        HexDirection::TopLeft,
    ];

    /// Index of this edge in a six-element wall array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The edge on the other side of the shared border.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            HexDirection::TopRight => HexDirection::BottomLeft,
            HexDirection::Right => HexDirection::Left,
            HexDirection::BottomRight => HexDirection::TopLeft,
            HexDirection::BottomLeft => HexDirection::TopRight,
            HexDirection::Left => HexDirection::Right,
            HexDirection::TopLeft => HexDirection::BottomRight,
        }
    }

    /// (row, col) offset of the neighbour across this edge.
    const fn offset(self, odd_row: bool) -> (isize, isize) {
        match (self, odd_row) {
            (HexDirection::Right, _) => (0, 1),
            (HexDirection::Left, _) => (0, -1),
            (HexDirection::TopRight, true) => (-1, 1),
            (HexDirection::TopRight, false) => (-1, 0),
            (HexDirection::BottomRight, true) => (1, 1),
            (HexDirection::BottomRight, false) => (1, 0),
            (HexDirection::BottomLeft, true) => (1, 0),
            (HexDirection::BottomLeft, false) => (1, -1),
            (HexDirection::TopLeft, true) => (-1, 0),
            (HexDirection::TopLeft, false) => (-1, -1),
        }
    }
}
