//! Input contracts for the engine.
//!
//! Adapters collect UI commands and scene notifications between ticks and
//! pass them into `Engine::update()` in arrival order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    /// Navigation/playback commands applied before deadlines are checked.
    #[serde(default)]
    pub commands: Vec<Command>,
    /// Notifications from the rendering engine.
    #[serde(default)]
    pub scene_events: Vec<SceneEvent>,
}

impl Inputs {
    pub fn command(cmd: Command) -> Self {
        Self {
            commands: vec![cmd],
            scene_events: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    JumpToFirst,
    JumpToLast,
    StepBack,
    StepForward,
    TogglePlay,
    /// Render the timeline as of a date without moving the cursor.
    ShowDate(NaiveDate),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SceneEvent {
    /// The engine rescaled or redrew; screen-space visuals must be
    /// re-placed from their last known state.
    Rescaled,
}
