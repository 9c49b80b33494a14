//! Parse the stored-events JSON schema into the canonical event model.
//!
//! The schema is a JSON array of event objects:
//!
//! ```json
//! {
//!   "date": "2013-12-06",
//!   "place": "Guinea",
//!   "city": null,
//!   "source": null,
//!   "link": "http://...",
//!   "lon": -9.18,
//!   "lat": 9.344,
//!   "extent": { "center": { "x": -12.5, "y": 8.4 }, "zoom": 3.64, "duration": 500 },
//!   "description": "..."
//! }
//! ```
//!
//! Dates are `YYYY-MM-DD`; malformed dates and missing coordinates are fatal
//! `ConfigError`s here, before any playback is possible.

use chrono::NaiveDate;
use serde::Deserialize;

use geotrail_api_core::{ConfigError, GeoPoint};

use crate::data::{CameraExtent, TimelineEvent};

/// Parse a stored-events JSON document into events, validating each record.
/// The result is unordered; `Timeline::load` sorts and applies cross-event
/// validation.
pub fn parse_stored_events_json(s: &str) -> Result<Vec<TimelineEvent>, ConfigError> {
    let raw: Vec<SeEvent> = serde_json::from_str(s)?;

    let mut events = Vec::with_capacity(raw.len());
    for se in raw {
        let date = NaiveDate::parse_from_str(&se.date, "%Y-%m-%d").map_err(|_| {
            ConfigError::UnparseableDate {
                raw: se.date.clone(),
            }
        })?;
        let event = TimelineEvent {
            date,
            place: se.place,
            city: se.city,
            source: se.source,
            coord: GeoPoint::new(se.lon as f32, se.lat as f32),
            extent: CameraExtent {
                center: GeoPoint::new(se.extent.center.x as f32, se.extent.center.y as f32),
                zoom: se.extent.zoom as f32,
                duration_ms: se.extent.duration as f32,
            },
            description: se.description,
            link: se.link,
        };
        event.validate_basic()?;
        events.push(event);
    }
    Ok(events)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct SeEvent {
    pub date: String,
    pub place: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    pub lon: f64,
    pub lat: f64,
    pub extent: SeExtent,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SeExtent {
    pub center: SeCenter,
    pub zoom: f64,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
struct SeCenter {
    pub x: f64,
    pub y: f64,
}
