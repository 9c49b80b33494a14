//! Read-only view of the host scene.
//!
//! Adapters implement this over the rendering engine and pass it into
//! `Engine::update()` each tick. Mutations never go through this trait;
//! they leave the engine as `SceneCommand`s for the adapter to apply.

use geotrail_api_core::{GeoPoint, ScreenPoint};

use crate::camera::Camera;

pub trait SceneView {
    /// Current viewport center and zoom.
    fn camera(&self) -> Camera;

    /// Project a world coordinate into display space.
    fn world_to_display(&self, point: GeoPoint) -> ScreenPoint;

    /// Current render scale factor; screen-constant visuals divide by this.
    fn scale_factor(&self) -> f32;
}
