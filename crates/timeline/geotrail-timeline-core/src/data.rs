//! Canonical timeline event model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use geotrail_api_core::{ConfigError, GeoPoint};

/// Target camera framing for an event: where the viewport should end up and
/// how long an animated move there may take.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CameraExtent {
    pub center: GeoPoint,
    pub zoom: f32,
    #[serde(rename = "duration")]
    pub duration_ms: f32,
}

/// One dated event on the timeline. Immutable after load.
///
/// `place` is the display/highlight key for the event's region; `source`
/// optionally names the `place` of an earlier event, forming the directed
/// edge along which the marker flies.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    pub date: NaiveDate,
    pub place: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub coord: GeoPoint,
    pub extent: CameraExtent,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl TimelineEvent {
    /// Validate per-event invariants (finite coordinates and extent).
    /// Cross-event invariants (source references) live in `Timeline::load`.
    pub fn validate_basic(&self) -> Result<(), ConfigError> {
        if !self.coord.is_finite() {
            return Err(ConfigError::InvalidCoordinate {
                place: self.place.clone(),
                lon: self.coord.lon,
                lat: self.coord.lat,
            });
        }
        if !self.extent.center.is_finite() || !self.extent.zoom.is_finite() {
            return Err(ConfigError::InvalidCoordinate {
                place: self.place.clone(),
                lon: self.extent.center.lon,
                lat: self.extent.center.lat,
            });
        }
        Ok(())
    }
}
