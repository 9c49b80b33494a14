//! Core configuration for geotrail-timeline-core.

use serde::{Deserialize, Serialize};

/// Timing and visual constants for the step sequencer.
/// Every field is a tunable; the defaults reproduce the reference behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Duration applied to animated camera transitions when an event's
    /// extent does not specify one, in milliseconds.
    pub camera_transition_ms: f32,

    /// Wall-clock duration of a marker flight, independent of the camera
    /// transition duration.
    pub flight_duration_ms: f32,

    /// Delay between auto-advanced steps while playing, measured from the
    /// start of each step.
    pub auto_advance_ms: f32,

    /// Delay before retrying a step request that arrived mid-transition.
    pub retry_delay_ms: f32,

    /// Safety factor over the camera transition duration before the step is
    /// considered settled. A heuristic margin, not a load-bearing invariant.
    pub settle_margin: f32,

    /// Normalized camera-distance threshold above which a transition is
    /// significant enough to animate.
    pub significance_threshold: f32,

    /// Trail stroke width in screen pixels (divided by the scene scale
    /// factor at draw time).
    pub trail_width_px: f32,

    /// Fill opacity of region overlays.
    pub region_fill_opacity: f32,

    /// Stroke opacity applied to trails of previous steps.
    pub faded_trail_opacity: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera_transition_ms: 500.0,
            flight_duration_ms: 3000.0,
            auto_advance_ms: 10_000.0,
            retry_delay_ms: 100.0,
            settle_margin: 1.1,
            significance_threshold: 1.0,
            trail_width_px: 5.0,
            region_fill_opacity: 0.7,
            faded_trail_opacity: 0.5,
        }
    }
}
