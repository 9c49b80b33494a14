//! Deterministic region color assignment.

use geotrail_api_core::{Color, OrdinalScale, CATEGORY10};

use crate::timeline::Timeline;

/// Neutral fallback for places outside the palette domain.
pub const FALLBACK_COLOR: Color = Color::rgb(0x7f, 0x7f, 0x7f);

/// Ordinal palette keyed by place name in timeline order. Stable across
/// renders for a given timeline; unknown places degrade to a neutral color
/// rather than failing.
#[derive(Clone, Debug)]
pub struct RegionPalette {
    scale: OrdinalScale,
}

impl RegionPalette {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let domain = timeline.events().iter().map(|e| e.place.clone());
        Self {
            scale: OrdinalScale::new(domain, CATEGORY10.to_vec()),
        }
    }

    pub fn color_of(&self, place: &str) -> Color {
        match self.scale.get(place) {
            Some(color) => color,
            None => {
                log::warn!("no palette entry for region '{place}', using fallback");
                FALLBACK_COLOR
            }
        }
    }

    /// Trail stroke shade for a destination region.
    pub fn trail_color_of(&self, place: &str) -> Color {
        self.color_of(place).darker()
    }
}
