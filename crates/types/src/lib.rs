//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no required dependencies, making them usable
//! from the rule engine, the terminal front-end and the replay recorder alike.
//!
//! # Board Dimensions
//!
//! The reference playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (5, 2), the origin cell of every new piece
//!
//! # Progression Tables
//!
//! | Level | Score threshold | Idle ticks before gravity |
//! |-------|-----------------|---------------------------|
//! | 0 | 30 | 33 |
//! | 1 | 60 | 25 |
//! | 2 | 90 | 22 |
//! | 3 | 110 | 20 |
//! | 4 | 220 | 18 |
//! | 5 | 230 | 16 |
//! | 6 | 250 | 14 |
//! | 7 | 270 | 10 |
//! | 8 | 300 | 8 |
//! | 9 | 500 | 2 |
//!
//! A level goes up once the score strictly exceeds the threshold of the current
//! level. Level 9 is the last one; the tables are never indexed past it.
//!
//! # Examples
//!
//! ```
//! use tui_blockfall_types::{Color, InputEvent, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(InputEvent::from_str("softDrop"), Some(InputEvent::SoftDrop));
//! assert_eq!(ShapeKind::from_index(6), Some(ShapeKind::I));
//! assert_eq!(Color::new(3).map(Color::get), Some(3));
//! assert!(Color::new(0).is_none());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::num::NonZeroU8;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u16 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u16 = 20;

/// Largest board side accepted when building a session
pub const MAX_BOARD_SIDE: u16 = 64;

/// Origin cell of freshly spawned pieces on the reference board (column, row)
pub const SPAWN_POSITION: (i16, i16) = (5, 2);

/// Number of distinct piece colors
pub const PALETTE_SIZE: u8 = 6;

/// Number of entries in the shape catalog
pub const SHAPE_COUNT: usize = 7;

/// Number of levels covered by the progression tables
pub const LEVEL_COUNT: usize = 10;

/// Highest reachable level (last valid table index)
pub const MAX_LEVEL: u32 = (LEVEL_COUNT - 1) as u32;

/// Score that must be strictly exceeded to leave each level
pub const LEVEL_THRESHOLDS: [u32; LEVEL_COUNT] = [30, 60, 90, 110, 220, 230, 250, 270, 300, 500];

/// Idle steps before the active piece is pulled down, by level
pub const TICK_INTERVALS: [u32; LEVEL_COUNT] = [33, 25, 22, 20, 18, 16, 14, 10, 8, 2];

/// Wall-clock duration of one step in the terminal front-end (milliseconds)
pub const STEP_MS: u64 = 30;

/// How long the game-over banner stays up before the program exits (milliseconds)
pub const GAME_OVER_HOLD_MS: u64 = 2000;

/// Color of an occupied cell, always in `1..=PALETTE_SIZE`
///
/// The niche in `NonZeroU8` keeps `Option<Color>` (a board [`Cell`]) one byte wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(NonZeroU8);

impl Color {
    /// Build a color from its palette number
    ///
    /// Returns `None` for 0 and for anything past the palette.
    pub fn new(value: u8) -> Option<Self> {
        if value > PALETTE_SIZE {
            return None;
        }
        NonZeroU8::new(value).map(Self)
    }

    /// Map a zero-based draw (e.g. from an RNG) onto the palette
    pub fn from_index(index: u32) -> Self {
        let value = (index % PALETTE_SIZE as u32) as u8 + 1;
        // value is in 1..=PALETTE_SIZE
        Self(NonZeroU8::MIN.saturating_add(value - 1))
    }

    pub fn get(self) -> u8 {
        self.0.get()
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a landed piece
pub type Cell = Option<Color>;

/// The seven catalog shapes, in catalog order
///
/// Names describe the silhouette in spawn orientation:
/// - **O**: 2x2 square
/// - **S** / **Z**: the two skew pieces
/// - **L** / **J**: the two hooked pieces
/// - **T**: three in a row with a stem below the middle
/// - **I**: the straight line (pivots off-center)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    O,
    S,
    Z,
    L,
    J,
    T,
    I,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::I,
    ];

    /// Position of this shape in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// One input event, consumed by exactly one session step
///
/// `None` is the idle step that lets the gravity counter accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum InputEvent {
    /// Nothing pressed this step
    #[default]
    None,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise about its origin cell
    Rotate,
    /// Rotate piece 90° counter-clockwise about its origin cell
    RotateCounterclockwise,
    /// Move piece one row down; lands the piece when blocked
    SoftDrop,
    /// Raise the level by one regardless of score
    ForceLevelUp,
    /// Leave the game (handled by the front-end)
    Quit,
}

impl InputEvent {
    pub const ALL: [InputEvent; 8] = [
        InputEvent::None,
        InputEvent::MoveLeft,
        InputEvent::MoveRight,
        InputEvent::Rotate,
        InputEvent::RotateCounterclockwise,
        InputEvent::SoftDrop,
        InputEvent::ForceLevelUp,
        InputEvent::Quit,
    ];

    /// Parse event from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_blockfall_types::InputEvent;
    ///
    /// assert_eq!(InputEvent::from_str("moveLeft"), Some(InputEvent::MoveLeft));
    /// assert_eq!(InputEvent::from_str("ROTATE"), Some(InputEvent::Rotate));
    /// assert_eq!(InputEvent::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(InputEvent::None),
            "moveleft" => Some(InputEvent::MoveLeft),
            "moveright" => Some(InputEvent::MoveRight),
            "rotate" => Some(InputEvent::Rotate),
            "rotatecounterclockwise" => Some(InputEvent::RotateCounterclockwise),
            "softdrop" => Some(InputEvent::SoftDrop),
            "forcelevelup" => Some(InputEvent::ForceLevelUp),
            "quit" => Some(InputEvent::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputEvent::None => "none",
            InputEvent::MoveLeft => "moveLeft",
            InputEvent::MoveRight => "moveRight",
            InputEvent::Rotate => "rotate",
            InputEvent::RotateCounterclockwise => "rotateCounterclockwise",
            InputEvent::SoftDrop => "softDrop",
            InputEvent::ForceLevelUp => "forceLevelUp",
            InputEvent::Quit => "quit",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, InputEvent::None)
    }
}
