//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`crate::types::InputEvent`] and buffers
//! presses that arrive between two session steps, so each step consumes exactly
//! one event.

pub mod buffer;
pub mod map;

pub use tui_blockfall_types as types;

pub use buffer::{InputBuffer, INPUT_BUFFER_CAPACITY};
pub use map::map_key_event;
