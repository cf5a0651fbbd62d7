//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the color
//! of a landed piece. Cells live in one flat row-major allocation made when the
//! board is created; nothing on the step path allocates.
//! Coordinates: (x, y) where x counts columns left to right and y counts rows top
//! to bottom. The reference board is 10x20.

use crate::geometry::Coord;
use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Box<[Cell]>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![None; len].into_boxed_slice(),
        }
    }

    /// Create the 10x20 reference board
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Whether any cell of `piece` is off the board or on a filled cell
    ///
    /// This single test decides moves, rotations and blocked spawns.
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        piece.cells().iter().any(|c| !self.is_valid(c.x, c.y))
    }

    /// Write the piece's color into its four cells
    ///
    /// The caller must already have checked [`Board::is_colliding`].
    pub fn stamp(&mut self, piece: &Piece) {
        for Coord { x, y } in piece.cells() {
            self.set(x, y, Some(piece.color));
        }
    }

    /// Check if a row is completely filled
    ///
    /// A zero-width board has no full rows.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| !row.is_empty() && row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Remove row `y`: every row above moves down one, row 0 becomes empty
    pub fn collapse_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }

        let width = self.width as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
    }

    /// Clear all full rows and return how many were cleared
    ///
    /// Scans bottom-up. A collapse pulls the row above into the same index, so the
    /// index is checked again before moving up; adjacent full rows need no second pass.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height as usize;

        while y > 0 {
            if self.is_row_full(y - 1) {
                self.collapse_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }

        cleared
    }

    /// Row `y` as a slice, or None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let width = self.width as usize;
        Some(&self.cells[y * width..(y + 1) * width])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width.max(1) as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Copy the grid into `out`, reusing its allocation
    pub fn write_cells(&self, out: &mut Vec<Cell>) {
        out.clear();
        out.extend_from_slice(&self.cells);
    }
}
