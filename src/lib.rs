//! TUI Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_blockfall::{core,input,term,types}` and
//! hosts the pieces that only the runnable program needs: environment
//! configuration, logging setup and replay recording.

pub use tui_blockfall_core as core;
pub use tui_blockfall_input as input;
pub use tui_blockfall_term as term;
pub use tui_blockfall_types as types;

pub mod config;
pub mod logging;
pub mod replay;

pub use config::Config;
pub use replay::{RecordedEvent, Replay, ReplayError, ReplayRecorder};
