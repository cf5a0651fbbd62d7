use crate::geometry::Coord;
use crate::piece::Piece;
use crate::types::{Cell, Color, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

/// Read-only copy of everything a renderer draws
///
/// Filled by [`crate::Session::snapshot_into`], which reuses the board buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u16,
    pub height: u16,
    /// Row-major cells, `width * height` long
    pub board: Vec<Cell>,
    pub active: Piece,
    pub next: Piece,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Cell at (x, y); out-of-range reads as empty
    pub fn cell(&self, x: u16, y: u16) -> Cell {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.board
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }

    /// Mutable access for building fixtures
    pub fn set_cell(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(slot) = self
            .board
            .get_mut(y as usize * self.width as usize + x as usize)
        {
            *slot = cell;
        }
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let (x, y) = SPAWN_POSITION;
        let placeholder = Piece::new(ShapeKind::O, Coord::new(x, y), Color::from_index(0));
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            active: placeholder,
            next: placeholder,
            score: 0,
            level: 0,
            lines: 0,
            game_over: false,
        }
    }
}
