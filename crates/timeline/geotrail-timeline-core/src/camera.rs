//! Camera state and the transition significance heuristic.

use serde::{Deserialize, Serialize};

use geotrail_api_core::GeoPoint;

use crate::data::CameraExtent;

/// Current viewport state as reported by the scene.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    pub center: GeoPoint,
    pub zoom: f32,
}

/// Whether to animate toward a target extent, and for how long.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransitionPlan {
    pub animate: bool,
    pub duration_ms: f32,
}

/// Normalized distance between the current camera and a target extent:
///
/// `sqrt((dx^2 + dy^2) * 2^zoom + (10 * dz)^2)`
///
/// evaluated at the current zoom. Center deltas are weighted by the zoom
/// scale so that the same world offset counts for more when zoomed in, and
/// a zoom delta of 0.1 weighs like one unit of scaled center distance. The
/// heuristic is deliberately cheap: it only gates whether to animate, never
/// where the camera ends up.
pub fn extent_norm(current: Camera, target: &CameraExtent) -> f32 {
    let dx = current.center.lon - target.center.lon;
    let dy = current.center.lat - target.center.lat;
    let dz = 10.0 * (current.zoom - target.zoom);
    ((dx * dx + dy * dy) * 2f32.powf(current.zoom) + dz * dz).sqrt()
}

/// Decide whether moving to `target` is significant enough to animate.
/// Significant moves use the extent's configured duration; insignificant
/// ones snap instantly.
pub fn plan_transition(current: Camera, target: &CameraExtent, threshold: f32) -> TransitionPlan {
    if extent_norm(current, target) > threshold {
        TransitionPlan {
            animate: true,
            duration_ms: target.duration_ms,
        }
    } else {
        TransitionPlan {
            animate: false,
            duration_ms: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent(lon: f32, lat: f32, zoom: f32) -> CameraExtent {
        CameraExtent {
            center: GeoPoint::new(lon, lat),
            zoom,
            duration_ms: 500.0,
        }
    }

    #[test]
    fn identical_state_snaps() {
        let camera = Camera {
            center: GeoPoint::new(-12.5, 8.4),
            zoom: 3.64,
        };
        let plan = plan_transition(camera, &extent(-12.5, 8.4, 3.64), 1.0);
        assert!(!plan.animate);
        assert_eq!(plan.duration_ms, 0.0);
    }

    #[test]
    fn distant_extent_animates_with_configured_duration() {
        let camera = Camera {
            center: GeoPoint::new(-12.5, 8.4),
            zoom: 3.64,
        };
        let plan = plan_transition(camera, &extent(-43.5, 26.4, 0.435), 1.0);
        assert!(plan.animate);
        assert_eq!(plan.duration_ms, 500.0);
    }

    #[test]
    fn zoom_delta_alone_is_significant() {
        let camera = Camera {
            center: GeoPoint::new(0.0, 0.0),
            zoom: 3.0,
        };
        // Same center, zoom differs by 0.2 -> dz = 2 -> norm = 2 > 1.
        let plan = plan_transition(camera, &extent(0.0, 0.0, 3.2), 1.0);
        assert!(plan.animate);
    }
}
