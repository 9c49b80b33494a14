//! Geotrail API core (engine-agnostic)
//!
//! Shared leaf types consumed by the timeline engine and by scene adapters:
//! geographic/screen geometry, colors and scales, per-feature-kind styles,
//! and the load-time error type.

pub mod color;
pub mod error;
pub mod geom;
pub mod style;

// Re-exports for consumers (engine and adapters)
pub use color::{
    ramp_by_name, Color, ColorParseError, OrdinalScale, QuantizeScale, BLUES7, CATEGORY10,
    GREENS7, REDS7,
};
pub use error::ConfigError;
pub use geom::{GeoPoint, ScreenPoint};
pub use style::{
    ColorSpec, ColumnSummary, FeatureStyle, LineStyle, PointStyle, PolygonStyle, ResolvedColor,
    StyleError, DEFAULT_COLOR,
};
