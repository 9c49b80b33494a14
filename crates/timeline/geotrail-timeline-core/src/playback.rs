//! Playback cursor and control enablement.

use serde::{Deserialize, Serialize};

/// Which step controls are enabled, derived from the cursor alone.
/// `play_shows_pause` flips the play affordance while playing.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlStates {
    pub first: bool,
    pub back: bool,
    pub play: bool,
    pub step: bool,
    pub last: bool,
    pub play_shows_pause: bool,
}

impl ControlStates {
    /// Pure function of `(index, count, playing)`:
    /// while playing everything except play/pause is disabled; at the first
    /// index the backward controls are disabled; at the last index the
    /// forward controls are disabled.
    pub fn derive(index: usize, count: usize, playing: bool) -> Self {
        if playing {
            return Self {
                first: false,
                back: false,
                play: true,
                step: false,
                last: false,
                play_shows_pause: true,
            };
        }
        let at_first = index == 0;
        let at_last = count == 0 || index + 1 >= count;
        Self {
            first: !at_first,
            back: !at_first,
            play: true,
            step: !at_last,
            last: !at_last,
            play_shows_pause: false,
        }
    }
}

/// The cursor over the timeline, owned by the engine.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Playback {
    pub index: usize,
    pub playing: bool,
}

impl Playback {
    pub fn controls(&self, count: usize) -> ControlStates {
        ControlStates::derive(self.index, count, self.playing)
    }

    /// Move back one step. Out-of-range calls are programming errors (the
    /// controls are disabled at the boundary): asserted in debug builds,
    /// clamped in release.
    pub fn step_back(&mut self) {
        debug_assert!(self.index > 0, "step_back at index 0");
        if self.index == 0 {
            log::warn!("step_back at index 0 clamped");
            return;
        }
        self.index -= 1;
    }

    /// Move forward one step; same boundary policy as `step_back`.
    pub fn step_forward(&mut self, count: usize) {
        debug_assert!(self.index + 1 < count, "step_forward at last index");
        if self.index + 1 >= count {
            log::warn!("step_forward at last index clamped");
            return;
        }
        self.index += 1;
    }

    /// Advance for the auto-play loop, wrapping past the end.
    pub fn advance_wrapping(&mut self, count: usize) {
        if count > 0 {
            self.index = (self.index + 1) % count;
        }
    }
}
