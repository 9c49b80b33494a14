//! Ordered, immutable store of timeline events.

use chrono::NaiveDate;

use geotrail_api_core::ConfigError;

use crate::data::TimelineEvent;

/// Events sorted non-decreasing by date, fixed after load.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Sort the events by date (stable, so equal dates keep their input
    /// order) and validate them: coordinates must be finite and every
    /// `source` must name the `place` of an event strictly earlier in the
    /// sorted sequence.
    pub fn load(mut events: Vec<TimelineEvent>) -> Result<Self, ConfigError> {
        events.sort_by_key(|e| e.date);
        for event in &events {
            event.validate_basic()?;
        }
        for (i, event) in events.iter().enumerate() {
            if let Some(source) = &event.source {
                let known = events[..i].iter().any(|prior| prior.place == *source);
                if !known {
                    return Err(ConfigError::UnknownSource {
                        place: event.place.clone(),
                        source: source.clone(),
                    });
                }
            }
        }
        Ok(Self { events })
    }

    /// The prefix of events dated at or before `date`.
    /// Monotonic: a later date always yields a superset prefix.
    pub fn active_prefix(&self, date: NaiveDate) -> &[TimelineEvent] {
        let n = self.events.iter().take_while(|e| e.date <= date).count();
        &self.events[..n]
    }

    pub fn event_at(&self, index: usize) -> Option<&TimelineEvent> {
        self.events.get(index)
    }

    /// The event whose `place` matches, if any. Places are unique-ish keys;
    /// the first (earliest) match wins.
    pub fn event_named(&self, place: &str) -> Option<&TimelineEvent> {
        self.events.iter().find(|e| e.place == place)
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
