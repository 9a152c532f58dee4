//! Paint and filter constants per render category.
//!
//! Every layer of a given category gets the same fixed paint values and the
//! same coarse geometry filter. Resolving a category twice yields identical
//! values, so callers may resolve eagerly or lazily as convenient.

use serde_json::{json, Map, Value};

use crate::geo::tag::{GeometryTag, RenderCategory};

/// Fixed paint values for a layer, keyed by its render category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintSpec {
    Circle {
        radius: f64,
        color: &'static str,
        opacity: f64,
    },
    Line {
        color: &'static str,
        width: f64,
    },
    Fill {
        color: &'static str,
        opacity: f64,
    },
}

impl PaintSpec {
    /// Serializes to the engine's paint property map.
    pub fn to_style_json(&self) -> Value {
        let mut paint = Map::new();
        match self {
            PaintSpec::Circle {
                radius,
                color,
                opacity,
            } => {
                paint.insert("circle-radius".into(), json!(radius));
                paint.insert("circle-color".into(), json!(color));
                paint.insert("circle-opacity".into(), json!(opacity));
            }
            PaintSpec::Line { color, width } => {
                paint.insert("line-color".into(), json!(color));
                paint.insert("line-width".into(), json!(width));
            }
            PaintSpec::Fill { color, opacity } => {
                paint.insert("fill-color".into(), json!(color));
                paint.insert("fill-opacity".into(), json!(opacity));
            }
        }
        Value::Object(paint)
    }
}

/// A coarse `$type` filter selecting features by singular geometry tag.
///
/// The filter tag is always singular. A Multi-variant feature satisfies the
/// filter of its singular counterpart, so a `Polygon` filter admits both
/// `Polygon` and `MultiPolygon` features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryFilter {
    geometry_type: GeometryTag,
}

impl GeometryFilter {
    /// Whether a feature with the given tag passes this filter.
    pub fn matches(&self, tag: GeometryTag) -> bool {
        tag.singular() == self.geometry_type
    }

    /// Serializes to the engine's filter expression form.
    pub fn to_expression(&self) -> Value {
        json!(["==", "$type", self.geometry_type.name()])
    }
}

impl RenderCategory {
    /// Returns the fixed paint values for this category.
    pub fn paint(&self) -> PaintSpec {
        match self {
            RenderCategory::Circle => PaintSpec::Circle {
                radius: 6.0,
                color: "#B42222",
                opacity: 0.6,
            },
            RenderCategory::Line => PaintSpec::Line {
                color: "#888",
                width: 8.0,
            },
            RenderCategory::Fill => PaintSpec::Fill {
                color: "#088",
                opacity: 0.8,
            },
        }
    }

    /// Returns the singular `$type` filter for this category.
    pub fn filter(&self) -> GeometryFilter {
        let geometry_type = match self {
            RenderCategory::Circle => GeometryTag::Point,
            RenderCategory::Line => GeometryTag::LineString,
            RenderCategory::Fill => GeometryTag::Polygon,
        };
        GeometryFilter { geometry_type }
    }
}
