//! Runtime configuration, read once from the environment.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | system clock | seed for piece/color draws |
//! | `BLOCKFALL_STEP_MS` | 30 | wall-clock length of one step |
//! | `BLOCKFALL_LOG_PATH` | unset | write logs to this file |
//! | `BLOCKFALL_RECORD_PATH` | unset | save a replay here on exit |
//!
//! Unparseable values fall back to the default.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::STEP_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub step_ms: u64,
    pub log_path: Option<PathBuf>,
    pub record_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            step_ms: STEP_MS,
            log_path: None,
            record_path: None,
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key/value source (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let step_ms = lookup("BLOCKFALL_STEP_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u64| ms > 0)
            .unwrap_or(STEP_MS);

        Self {
            seed,
            step_ms,
            log_path: non_empty_path(lookup("BLOCKFALL_LOG_PATH")),
            record_path: non_empty_path(lookup("BLOCKFALL_RECORD_PATH")),
        }
    }

    pub fn step_duration(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }
}

fn non_empty_path(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let cfg = Config::from_lookup(lookup(&[
            ("BLOCKFALL_SEED", "42"),
            ("BLOCKFALL_STEP_MS", " 16 "),
            ("BLOCKFALL_LOG_PATH", "/tmp/blockfall.log"),
            ("BLOCKFALL_RECORD_PATH", "run.json"),
        ]));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.step_ms, 16);
        assert_eq!(cfg.step_duration(), Duration::from_millis(16));
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/blockfall.log")));
        assert_eq!(cfg.record_path, Some(PathBuf::from("run.json")));
    }

    #[test]
    fn bad_values_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup(&[
            ("BLOCKFALL_SEED", "7"),
            ("BLOCKFALL_STEP_MS", "fast"),
            ("BLOCKFALL_LOG_PATH", "   "),
        ]));
        assert_eq!(cfg.step_ms, STEP_MS);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.record_path, None);

        let zero = Config::from_lookup(lookup(&[("BLOCKFALL_STEP_MS", "0")]));
        assert_eq!(zero.step_ms, STEP_MS);
    }
}
