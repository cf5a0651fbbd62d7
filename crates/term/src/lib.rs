//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders a [`core::GameSnapshot`] into a simple framebuffer that is then
//! flushed to the terminal, sending only what changed between frames.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep drawing pure (`GameView`) and I/O separate (`TerminalRenderer`)
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_blockfall_core as core;
pub use tui_blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{palette, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
