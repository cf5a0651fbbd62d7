//! Deterministic replays.
//!
//! A session is fully determined by its seed, board geometry and the event fed to
//! each step, so a replay stores only those plus the non-idle events (idle steps
//! are implied by the step count). Files are JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Coord, Session, SessionError, SimpleRng};
use crate::types::{InputEvent, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay file: {0}")]
    Io(#[from] std::io::Error),

    #[error("replay format: {0}")]
    Json(#[from] serde_json::Error),

    #[error("replay header: {0}")]
    Session(#[from] SessionError),

    #[error("event at step {step} is out of order or past the last step ({steps})")]
    OutOfOrder { step: u64, steps: u64 },
}

/// An event fed to the session at a given step index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub step: u64,
    pub event: InputEvent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub seed: u32,
    pub columns: u16,
    pub rows: u16,
    pub spawn: (i16, i16),
    /// Total number of steps recorded, idle ones included
    pub steps: u64,
    pub events: Vec<RecordedEvent>,
}

impl Replay {
    /// Empty replay of a standard game
    pub fn standard(seed: u32) -> Self {
        Self {
            seed,
            columns: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            spawn: SPAWN_POSITION,
            steps: 0,
            events: Vec::new(),
        }
    }

    /// A fresh session matching this replay's header
    pub fn new_session(&self) -> Result<Session<SimpleRng>, ReplayError> {
        let (x, y) = self.spawn;
        let session = Session::new(
            self.columns,
            self.rows,
            Coord::new(x, y),
            SimpleRng::new(self.seed),
        )?;
        Ok(session)
    }

    /// Re-run every recorded step and return the resulting session
    pub fn play(&self) -> Result<Session<SimpleRng>, ReplayError> {
        let mut session = self.new_session()?;
        let mut events = self.events.iter().peekable();

        for step in 0..self.steps {
            let event = match events.peek() {
                Some(&&rec) if rec.step == step => {
                    events.next();
                    rec.event
                }
                _ => InputEvent::None,
            };
            session.step(event);
        }

        // Anything left was recorded out of order or beyond `steps`.
        if let Some(rec) = events.next() {
            return Err(ReplayError::OutOfOrder {
                step: rec.step,
                steps: self.steps,
            });
        }

        Ok(session)
    }

    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

/// Appends one entry per step as the game is played.
#[derive(Debug, Clone)]
pub struct ReplayRecorder {
    replay: Replay,
}

impl ReplayRecorder {
    pub fn new(header: Replay) -> Self {
        let mut replay = header;
        replay.steps = 0;
        replay.events.clear();
        Self { replay }
    }

    /// Record the event handed to the next `Session::step` call.
    pub fn record(&mut self, event: InputEvent) {
        if !event.is_none() {
            self.replay.events.push(RecordedEvent {
                step: self.replay.steps,
                event,
            });
        }
        self.replay.steps += 1;
    }

    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    pub fn finish(self) -> Replay {
        self.replay
    }
}
