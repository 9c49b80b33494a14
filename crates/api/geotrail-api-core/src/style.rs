//! Per-feature-kind visual styles.
//!
//! Each feature kind (point, line, polygon) carries a fixed, explicit field
//! set, validated at construction. Stroke and fill colors are either a
//! constant or a named ramp resolved against a column summary: categorical
//! summaries produce an ordinal scale over the ramp, continuous summaries a
//! quantize scale. An unknown ramp or a key with no summary degrades to the
//! default constant color.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{ramp_by_name, Color, OrdinalScale, QuantizeScale};

/// Fallback used when a ramp or summary key cannot be resolved.
pub const DEFAULT_COLOR: Color = Color::rgb(0, 0, 0);

#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("style field '{field}' must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("style field '{field}' must be in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
}

fn check_finite(field: &'static str, value: f32) -> Result<(), StyleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StyleError::NonFinite { field, value })
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), StyleError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(StyleError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// A stroke or fill color: constant, or ramped over a data column.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColorSpec {
    Constant(Color),
    Ramped { ramp: String, key: String },
}

/// Summary of the data column a ramped color is keyed on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ColumnSummary {
    Categorical { values: Vec<String> },
    Continuous { min: f32, max: f32 },
}

/// A color spec resolved against column summaries, ready to color features.
#[derive(Clone, Debug)]
pub enum ResolvedColor {
    Constant(Color),
    Ordinal(OrdinalScale),
    Quantize(QuantizeScale),
}

impl ResolvedColor {
    pub fn for_category(&self, key: &str) -> Color {
        match self {
            ResolvedColor::Constant(c) => *c,
            ResolvedColor::Ordinal(scale) => scale.get(key).unwrap_or(DEFAULT_COLOR),
            ResolvedColor::Quantize(_) => DEFAULT_COLOR,
        }
    }

    pub fn for_value(&self, value: f32) -> Color {
        match self {
            ResolvedColor::Constant(c) => *c,
            ResolvedColor::Ordinal(_) => DEFAULT_COLOR,
            ResolvedColor::Quantize(scale) => scale.get(value).unwrap_or(DEFAULT_COLOR),
        }
    }
}

impl ColorSpec {
    /// Resolve this spec against the available column summaries.
    /// Constant specs pass through; ramped specs build the matching scale.
    /// Unknown ramps and unsummarized keys fall back to `DEFAULT_COLOR`.
    pub fn resolve(&self, summaries: &HashMap<String, ColumnSummary>) -> ResolvedColor {
        match self {
            ColorSpec::Constant(c) => ResolvedColor::Constant(*c),
            ColorSpec::Ramped { ramp, key } => {
                let colors = match ramp_by_name(ramp) {
                    Some(r) => r.to_vec(),
                    None => return ResolvedColor::Constant(DEFAULT_COLOR),
                };
                match summaries.get(key) {
                    Some(ColumnSummary::Categorical { values }) => ResolvedColor::Ordinal(
                        OrdinalScale::new(values.iter().cloned(), colors),
                    ),
                    Some(ColumnSummary::Continuous { min, max }) => {
                        ResolvedColor::Quantize(QuantizeScale::new(*min, *max, colors))
                    }
                    None => ResolvedColor::Constant(DEFAULT_COLOR),
                }
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PointStyle {
    pub radius: f32,
    pub stroke: bool,
    pub stroke_width: f32,
    pub stroke_color: ColorSpec,
    pub stroke_opacity: f32,
    pub fill: bool,
    pub fill_color: ColorSpec,
    pub fill_opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            radius: 8.0,
            stroke: true,
            stroke_width: 2.0,
            stroke_color: ColorSpec::Constant(Color::rgb(0, 0, 0)),
            stroke_opacity: 1.0,
            fill: true,
            fill_color: ColorSpec::Constant(Color::rgb(255, 0, 0)),
            fill_opacity: 0.75,
        }
    }
}

impl PointStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        check_range("radius", self.radius, 0.0, f32::MAX)?;
        check_range("strokeWidth", self.stroke_width, 0.0, f32::MAX)?;
        check_range("strokeOpacity", self.stroke_opacity, 0.0, 1.0)?;
        check_range("fillOpacity", self.fill_opacity, 0.0, 1.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineStyle {
    pub stroke: bool,
    pub stroke_width: f32,
    pub stroke_color: ColorSpec,
    pub stroke_opacity: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke: true,
            stroke_width: 2.0,
            stroke_color: ColorSpec::Constant(Color::rgb(0, 0, 0)),
            stroke_opacity: 1.0,
        }
    }
}

impl LineStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        check_range("strokeWidth", self.stroke_width, 0.0, f32::MAX)?;
        check_range("strokeOpacity", self.stroke_opacity, 0.0, 1.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PolygonStyle {
    pub stroke: bool,
    pub stroke_width: f32,
    pub stroke_color: ColorSpec,
    pub stroke_opacity: f32,
    pub fill: bool,
    pub fill_color: ColorSpec,
    pub fill_opacity: f32,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            stroke: true,
            stroke_width: 2.0,
            stroke_color: ColorSpec::Constant(Color::rgb(0, 0, 0)),
            stroke_opacity: 1.0,
            fill: true,
            fill_color: ColorSpec::Constant(Color::rgb(255, 0, 0)),
            fill_opacity: 0.75,
        }
    }
}

impl PolygonStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        check_range("strokeWidth", self.stroke_width, 0.0, f32::MAX)?;
        check_range("strokeOpacity", self.stroke_opacity, 0.0, 1.0)?;
        check_range("fillOpacity", self.fill_opacity, 0.0, 1.0)
    }
}

/// A style tagged by the feature kind it applies to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureStyle {
    Point(PointStyle),
    Line(LineStyle),
    Polygon(PolygonStyle),
}

impl FeatureStyle {
    pub fn validate(&self) -> Result<(), StyleError> {
        match self {
            FeatureStyle::Point(s) => s.validate(),
            FeatureStyle::Line(s) => s.validate(),
            FeatureStyle::Polygon(s) => s.validate(),
        }
    }
}
