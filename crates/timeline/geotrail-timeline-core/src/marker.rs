//! Marker flight: the oriented icon animated between two events.
//!
//! A flight owns the source/destination coordinates, the icon rotation
//! (fixed at spawn from the screen-space bearing), and the last known
//! normalized progress `t`. Progress advances with the engine clock;
//! viewport changes re-place the icon and trail from the saved `t` without
//! touching the clock.

use serde::{Deserialize, Serialize};

use geotrail_api_core::{Color, GeoPoint, ScreenPoint};

use crate::scene::SceneView;

/// Icon scale over the course of a flight: 1 at both endpoints, peaking at
/// 2 mid-flight for a pop-in/pop-out emphasis.
#[inline]
pub fn scale_pulse(t: f32) -> f32 {
    1.0 - 4.0 * t * (t - 1.0)
}

/// Icon rotation from the screen-space bearing between the projected source
/// and destination, converted to the icon's local convention (the asset's
/// nose points down the +y screen axis at 180 degrees).
#[inline]
pub fn rotation_deg(from: ScreenPoint, to: ScreenPoint) -> f32 {
    let bearing = (to.x - from.x).atan2(to.y - from.y);
    180.0 - bearing.to_degrees()
}

/// Screen placement of the marker icon for one frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SpritePlacement {
    pub at: ScreenPoint,
    pub scale: f32,
}

/// Screen geometry of the trail line for one frame.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrailGeometry {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

/// One in-flight marker animation.
#[derive(Clone, Debug)]
pub struct MarkerFlight {
    from: GeoPoint,
    to: GeoPoint,
    dest_place: String,
    trail_color: Color,
    rotation: f32,
    /// Last known normalized progress, kept for viewport-driven redraws.
    t: f32,
    started_at_ms: f32,
    ends_at_ms: f32,
}

impl MarkerFlight {
    /// Start a flight at `now_ms`. The rotation is computed once, from the
    /// current projection of the endpoints.
    pub fn begin(
        from: GeoPoint,
        to: GeoPoint,
        dest_place: String,
        trail_color: Color,
        now_ms: f32,
        duration_ms: f32,
        view: &dyn SceneView,
    ) -> Self {
        let rotation = rotation_deg(view.world_to_display(from), view.world_to_display(to));
        Self {
            from,
            to,
            dest_place,
            trail_color,
            rotation,
            t: 0.0,
            started_at_ms: now_ms,
            ends_at_ms: now_ms + duration_ms,
        }
    }

    pub fn dest_place(&self) -> &str {
        &self.dest_place
    }

    pub fn trail_color(&self) -> Color {
        self.trail_color
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn progress(&self) -> f32 {
        self.t
    }

    /// Advance progress from the engine clock.
    pub fn tick(&mut self, now_ms: f32) {
        let span = (self.ends_at_ms - self.started_at_ms).max(f32::EPSILON);
        self.t = ((now_ms - self.started_at_ms) / span).clamp(0.0, 1.0);
    }

    /// Completion is deadline-driven, not a check against `t == 1`.
    pub fn is_complete(&self, now_ms: f32) -> bool {
        now_ms >= self.ends_at_ms
    }

    /// World position at the last known progress.
    pub fn position(&self) -> GeoPoint {
        self.from.lerp(self.to, self.t)
    }

    /// Icon placement for the current viewport: projected position plus the
    /// pulse scale corrected for the scene scale factor, so the icon keeps a
    /// constant screen size under zoom.
    pub fn sprite(&self, view: &dyn SceneView) -> SpritePlacement {
        SpritePlacement {
            at: view.world_to_display(self.position()),
            scale: scale_pulse(self.t) / view.scale_factor(),
        }
    }

    /// Trail geometry for the current viewport: projected source point to
    /// projected marker point.
    pub fn trail(&self, view: &dyn SceneView) -> TrailGeometry {
        TrailGeometry {
            from: view.world_to_display(self.from),
            to: view.world_to_display(self.position()),
        }
    }

    pub fn started_at_ms(&self) -> f32 {
        self.started_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_endpoints_and_peak() {
        assert_eq!(scale_pulse(0.0), 1.0);
        assert_eq!(scale_pulse(1.0), 1.0);
        assert_eq!(scale_pulse(0.5), 2.0);
        assert!(scale_pulse(0.25) > 1.0);
    }

    #[test]
    fn rotation_matches_screen_bearing() {
        // Straight down the +y screen axis: bearing 0, icon convention 180.
        let r = rotation_deg(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 10.0));
        assert!((r - 180.0).abs() < 1e-4);
        // Straight along +x: bearing 90 degrees, icon convention 90.
        let r = rotation_deg(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 0.0));
        assert!((r - 90.0).abs() < 1e-4);
    }
}
