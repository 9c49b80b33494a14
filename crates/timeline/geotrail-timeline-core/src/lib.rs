//! Geotrail timeline core (engine-agnostic)
//!
//! The animated map-timeline driver: an ordered store of dated events, a
//! camera-transition planner, a marker flight animator, a playback
//! controller, and the coordinator that sequences them per step. The host
//! rendering engine is reached through the read-only [`SceneView`] trait;
//! all mutations leave the engine as [`SceneCommand`]s that adapters apply.
//! Time is a millisecond clock advanced by [`Engine::update`].

pub mod camera;
pub mod config;
pub mod data;
pub mod engine;
pub mod inputs;
pub mod marker;
pub mod outputs;
pub mod palette;
pub mod playback;
pub mod scene;
pub mod stored_events;
pub mod timeline;

// Re-exports for consumers (adapters)
pub use camera::{plan_transition, Camera, TransitionPlan};
pub use config::Config;
pub use data::{CameraExtent, TimelineEvent};
pub use engine::{Engine, Phase};
pub use inputs::{Command, Inputs, SceneEvent};
pub use marker::{rotation_deg, scale_pulse, MarkerFlight, SpritePlacement, TrailGeometry};
pub use outputs::{ControlStates, CoreEvent, Outputs, SceneCommand};
pub use palette::RegionPalette;
pub use playback::Playback;
pub use scene::SceneView;
pub use stored_events::parse_stored_events_json;
pub use timeline::Timeline;
pub use geotrail_api_core::{Color, ConfigError, GeoPoint, ScreenPoint};
