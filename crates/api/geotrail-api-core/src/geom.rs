//! Geographic and screen-space points.
//!
//! `GeoPoint` is a world coordinate (longitude/latitude degrees), `ScreenPoint`
//! a display-space pixel position produced by the scene's projection. Both are
//! plain data; all projection lives behind the `SceneView` trait in the engine
//! crate.

use serde::{Deserialize, Serialize};

/// World coordinate in degrees.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lon: f32,
    pub lat: f32,
}

impl GeoPoint {
    pub const fn new(lon: f32, lat: f32) -> Self {
        Self { lon, lat }
    }

    /// Component-wise linear interpolation between `self` and `other`.
    /// Exact at the endpoints: `lerp(a, b, 0.0) == a`, `lerp(a, b, 1.0) == b`.
    #[inline]
    pub fn lerp(self, other: GeoPoint, t: f32) -> GeoPoint {
        GeoPoint {
            lon: self.lon + (other.lon - self.lon) * t,
            lat: self.lat + (other.lat - self.lat) * t,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// Display-space position in pixels.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = GeoPoint::new(-9.18, 9.344);
        let b = GeoPoint::new(-10.8, 6.317);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(2.0, -4.0);
        let m = a.lerp(b, 0.5);
        assert!((m.lon - 1.0).abs() < 1e-6);
        assert!((m.lat + 2.0).abs() < 1e-6);
    }
}
