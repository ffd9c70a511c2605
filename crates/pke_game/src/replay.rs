//! Recorded intent sequences: the demo driver's input source and the
//! backbone of determinism tests.
//!
//! A replay frame stores *held* controls plus a repeat count; the jump
//! request edge is derived from held-state transitions through the same
//! [`IntentTracker`] a live shell uses, so a replay cannot express an edge
//! pattern the real input path could not produce.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use pke_core::input::{IntentTracker, Intents};
use pke_core::time::MAX_STEP_SECONDS;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_left: bool,
    #[serde(default)]
    pub move_right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    /// Expand into one `Intents` per simulation step.
    pub fn expanded_intents(&self) -> Vec<Intents> {
        let mut tracker = IntentTracker::new();
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                if frame.move_left {
                    tracker.press_left();
                } else {
                    tracker.release_left();
                }
                if frame.move_right {
                    tracker.press_right();
                } else {
                    tracker.release_right();
                }
                if frame.jump {
                    tracker.press_jump();
                } else {
                    tracker.release_jump();
                }
                out.push(tracker.sample());
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if replay.fixed_dt > MAX_STEP_SECONDS {
        log::warn!(
            "Replay fixed_dt {}s exceeds the step cap; steps will be capped to {}s",
            replay.fixed_dt,
            MAX_STEP_SECONDS
        );
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}
