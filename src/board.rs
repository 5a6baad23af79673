//! Grid primitives: tiles and the board that owns them

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tile: an immutable value at a board position.
///
/// Tiles are never mutated in place. Sliding produces a copy at the new
/// cell, and merging produces a fresh tile of doubled value; both happen
/// inside [`Board::move_tile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    value: u32,
    col: usize,
    row: usize,
}

impl Tile {
    /// Create a tile with `value` at `(col, row)`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a power of two of at least 2.
    pub const fn new(value: u32, col: usize, row: usize) -> Self {
        assert!(value >= 2 && value.is_power_of_two(), "tile value must be a power of two >= 2");
        Self { value, col, row }
    }

    /// The tile's value.
    pub const fn value(self) -> u32 {
        self.value
    }

    /// The column holding this tile.
    pub const fn col(self) -> usize {
        self.col
    }

    /// The row holding this tile.
    pub const fn row(self) -> usize {
        self.row
    }

    /// Copy of this tile relocated to `(col, row)`.
    const fn moved(self, col: usize, row: usize) -> Self {
        Self { value: self.value, col, row }
    }

    /// The tile produced when this tile lands on an equal one at `(col, row)`.
    const fn merged(self, col: usize, row: usize) -> Self {
        Self { value: self.value * 2, col, row }
    }
}

/// An N×N grid of cells, each holding at most one tile.
///
/// `(0, 0)` is the bottom-left corner and the first index is the column,
/// like `(x, y)` coordinates. The board owns its tiles exclusively: a tile
/// is reachable only through the cell that currently holds it, and a
/// tile's recorded position always matches that cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Create an empty board with `size` cells per side.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from a raw value matrix indexed `[row][col]`, with
    /// row 0 at the bottom and `0` marking an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or not square, or if any nonzero entry
    /// is not a valid tile value.
    pub fn from_values(values: &[Vec<u32>]) -> Self {
        let size = values.len();
        let mut board = Self::new(size);
        for (row, row_values) in values.iter().enumerate() {
            assert_eq!(row_values.len(), size, "value matrix must be square");
            for (col, &value) in row_values.iter().enumerate() {
                if value != 0 {
                    board.add_tile(Tile::new(value, col, row));
                }
            }
        }
        board
    }

    /// Number of cells on one side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The tile at `(col, row)`, or `None` for an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board.
    pub fn tile(&self, col: usize, row: usize) -> Option<Tile> {
        self.cells[self.index(col, row)]
    }

    /// Place a new tile on an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the target cell is occupied or outside the board; either
    /// indicates a bug in the caller, not a recoverable condition.
    pub fn add_tile(&mut self, tile: Tile) {
        let index = self.index(tile.col(), tile.row());
        assert!(
            self.cells[index].is_none(),
            "cell ({}, {}) is already occupied",
            tile.col(),
            tile.row()
        );
        self.cells[index] = Some(tile);
    }

    /// Move `tile` into `(col, row)`, clearing the cell it came from.
    ///
    /// If the destination held another tile, both are replaced by a single
    /// tile of doubled value and the call returns `true`; callers read the
    /// result back with [`Board::tile`]. A plain relocation returns
    /// `false`.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is not the tile currently recorded at its own
    /// position, or if either cell is outside the board.
    pub fn move_tile(&mut self, col: usize, row: usize, tile: Tile) -> bool {
        let from = self.index(tile.col(), tile.row());
        let occupant = self.cells[from].expect("no tile at source cell");
        assert_eq!(occupant, tile, "source cell holds a different tile");
        self.cells[from] = None;

        let to = self.index(col, row);
        match self.cells[to] {
            Some(_) => {
                self.cells[to] = Some(tile.merged(col, row));
                true
            }
            None => {
                self.cells[to] = Some(tile.moved(col, row));
                false
            }
        }
    }

    /// Remove every tile from the board.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn index(&self, col: usize, row: usize) -> usize {
        assert!(
            col < self.size && row < self.size,
            "cell ({}, {}) outside a {}x{} board",
            col,
            row,
            self.size,
            self.size
        );
        col * self.size + row
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.size).rev() {
            for col in 0..self.size {
                match self.tile(col, row) {
                    Some(tile) => write!(f, "|{:4}", tile.value())?,
                    None => write!(f, "|    ")?,
                }
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
