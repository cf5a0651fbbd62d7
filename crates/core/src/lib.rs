//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else. It has **no
//! dependencies** on terminals, keyboards or clocks, which makes it:
//!
//! - **Deterministic**: the same seed and the same event list give the same game
//! - **Testable**: each rule is exercised without a display
//! - **Portable**: the front-end is a thin loop around [`Session::step`]
//!
//! # Module Structure
//!
//! - [`geometry`]: coordinates, quarter-turn rotation, the 7-entry shape catalog
//! - [`piece`]: a shape on the board (origin, three offsets, color)
//! - [`board`]: the grid with collision testing, stamping and line clearing
//! - [`progression`]: level thresholds and gravity speed
//! - [`session`]: the step-driven state machine
//! - [`rng`]: the random source seam and a seeded LCG
//! - [`snapshot`]: a read-only copy for renderers
//!
//! # Game Rules
//!
//! - Pieces rotate about their origin cell, not about a bounding-box center
//! - Moves and rotations that would collide are ignored
//! - A soft drop that would collide lands the piece; full rows are cleared
//! - Each cleared row scores one point; the level rises once per landing when
//!   the score passes the current level's threshold
//! - The game ends when a freshly promoted piece collides at the spawn point
//!
//! # Example
//!
//! ```
//! use tui_blockfall_core::Session;
//! use tui_blockfall_types::InputEvent;
//!
//! let mut session = Session::standard(12345);
//!
//! session.step(InputEvent::MoveRight);
//! session.step(InputEvent::Rotate);
//!
//! // Drop until the piece lands.
//! while !session.step(InputEvent::SoftDrop).landed {}
//!
//! assert_eq!(session.board().filled_count() % 4, 0);
//! assert!(!session.game_over());
//! ```
//!
//! # Timing
//!
//! The session counts steps, not milliseconds. Idle steps accumulate until the
//! level's tick interval is exceeded and then act as a soft drop. The front-end
//! decides how long a step lasts.

pub mod board;
pub mod geometry;
pub mod piece;
pub mod progression;
pub mod rng;
pub mod session;
pub mod snapshot;

pub use tui_blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use geometry::{catalog_shape, rotate_clockwise, rotate_counterclockwise, Coord, Shape, CATALOG};
pub use piece::Piece;
pub use progression::{force_level_up, level_after_score, level_threshold, tick_interval};
pub use rng::{RandomSource, SimpleRng};
pub use session::{Session, SessionError, StepOutcome};
pub use snapshot::GameSnapshot;
