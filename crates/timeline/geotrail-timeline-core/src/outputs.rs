//! Output contracts from the engine.
//!
//! Each tick produces a batch of scene commands (applied by the adapter in
//! order) and a list of semantic events for observers. The engine never
//! touches the scene directly.

use serde::{Deserialize, Serialize};

use geotrail_api_core::{LineStyle, PolygonStyle};

use crate::data::CameraExtent;
use crate::marker::{SpritePlacement, TrailGeometry};

pub use crate::playback::ControlStates;

/// One mutation for the adapter to apply to the host scene/UI.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum SceneCommand {
    SetDateLabel(String),
    ShowDescription {
        html: String,
    },
    HideDescription,
    /// Move the camera to the extent; `duration_ms` zero means snap.
    CameraTransition {
        extent: CameraExtent,
        duration_ms: f32,
    },
    /// Draw (or reveal) a region's border overlay.
    ShowRegion {
        place: String,
        style: PolygonStyle,
    },
    /// Keep a region's overlay in the scene but invisible.
    HideRegion {
        place: String,
    },
    /// Draw or re-place the trail line owned by `place`.
    DrawTrail {
        place: String,
        line: TrailGeometry,
        style: LineStyle,
    },
    RemoveTrail {
        place: String,
    },
    /// Dim every surviving trail from a previous step.
    FadeTrails {
        opacity: f32,
    },
    SpawnMarker {
        placement: SpritePlacement,
        rotation_deg: f32,
    },
    MoveMarker {
        placement: SpritePlacement,
    },
    RemoveMarker,
    UpdateControls(ControlStates),
    /// Teardown: remove every visual and widget owned by this view.
    ClearScene,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum CoreEvent {
    StepShown {
        date: chrono::NaiveDate,
        active: usize,
    },
    TransitionStarted {
        duration_ms: f32,
    },
    TransitionSettled,
    FlightStarted {
        from_place: String,
        to_place: String,
        duration_ms: f32,
    },
    FlightCompleted {
        place: String,
    },
    PlaybackStarted,
    PlaybackStopped,
    RetryDeferred,
}

/// Outputs returned by `Engine::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub commands: Vec<SceneCommand>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_command(&mut self, command: SceneCommand) {
        self.commands.push(command);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.events.is_empty()
    }
}
