//! Geometry type tags and render categories.
//!
//! Features are grouped for styling by their GeoJSON geometry type. The tag
//! set is closed: anything outside it (a `GeometryCollection`, or an unknown
//! type string in hand-written data) has no render category and is skipped by
//! the layer materializer.

use geojson::{Geometry, Value};
use serde::Serialize;

/// A recognized GeoJSON geometry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryTag {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryTag {
    /// Parses a GeoJSON `type` tag. Unknown strings yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Point" => Some(GeometryTag::Point),
            "MultiPoint" => Some(GeometryTag::MultiPoint),
            "LineString" => Some(GeometryTag::LineString),
            "MultiLineString" => Some(GeometryTag::MultiLineString),
            "Polygon" => Some(GeometryTag::Polygon),
            "MultiPolygon" => Some(GeometryTag::MultiPolygon),
            _ => None,
        }
    }

    /// Returns the tag of a parsed geometry.
    ///
    /// A `GeometryCollection` has no single type to style by and yields
    /// `None`.
    pub fn of(geometry: &Geometry) -> Option<Self> {
        match geometry.value {
            Value::Point(_) => Some(GeometryTag::Point),
            Value::MultiPoint(_) => Some(GeometryTag::MultiPoint),
            Value::LineString(_) => Some(GeometryTag::LineString),
            Value::MultiLineString(_) => Some(GeometryTag::MultiLineString),
            Value::Polygon(_) => Some(GeometryTag::Polygon),
            Value::MultiPolygon(_) => Some(GeometryTag::MultiPolygon),
            Value::GeometryCollection(_) => None,
        }
    }

    /// Returns the GeoJSON name of this tag.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryTag::Point => "Point",
            GeometryTag::MultiPoint => "MultiPoint",
            GeometryTag::LineString => "LineString",
            GeometryTag::MultiLineString => "MultiLineString",
            GeometryTag::Polygon => "Polygon",
            GeometryTag::MultiPolygon => "MultiPolygon",
        }
    }

    /// Folds a Multi-variant onto its singular tag.
    ///
    /// Layer filters select by singular `$type` only; a MultiPolygon feature
    /// satisfies a `Polygon` filter.
    pub fn singular(&self) -> GeometryTag {
        match self {
            GeometryTag::Point | GeometryTag::MultiPoint => GeometryTag::Point,
            GeometryTag::LineString | GeometryTag::MultiLineString => GeometryTag::LineString,
            GeometryTag::Polygon | GeometryTag::MultiPolygon => GeometryTag::Polygon,
        }
    }

    /// Returns the render category for this tag.
    pub fn category(&self) -> RenderCategory {
        match self {
            GeometryTag::Point | GeometryTag::MultiPoint => RenderCategory::Circle,
            GeometryTag::LineString | GeometryTag::MultiLineString => RenderCategory::Line,
            GeometryTag::Polygon | GeometryTag::MultiPolygon => RenderCategory::Fill,
        }
    }
}

impl std::fmt::Display for GeometryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a layer renders the features it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderCategory {
    Circle,
    Line,
    Fill,
}

impl RenderCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RenderCategory::Circle => "circle",
            RenderCategory::Line => "line",
            RenderCategory::Fill => "fill",
        }
    }
}

/// Returns the render category for a geometry type name, or `None` when the
/// name is not a recognized tag.
pub fn classify(geometry_type: &str) -> Option<RenderCategory> {
    GeometryTag::from_name(geometry_type).map(|tag| tag.category())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_point_types() {
        assert_eq!(classify("Point"), Some(RenderCategory::Circle));
        assert_eq!(classify("MultiPoint"), Some(RenderCategory::Circle));
    }

    #[test]
    fn test_classify_line_types() {
        assert_eq!(classify("LineString"), Some(RenderCategory::Line));
        assert_eq!(classify("MultiLineString"), Some(RenderCategory::Line));
    }

    #[test]
    fn test_classify_polygon_types() {
        assert_eq!(classify("Polygon"), Some(RenderCategory::Fill));
        assert_eq!(classify("MultiPolygon"), Some(RenderCategory::Fill));
    }

    #[test]
    fn test_classify_unknown_types() {
        assert_eq!(classify("GeometryCollection"), None);
        assert_eq!(classify("Circle"), None);
        assert_eq!(classify("point"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn test_tag_of_geometry() {
        let geometry = Geometry::new(Value::MultiPolygon(vec![]));
        assert_eq!(GeometryTag::of(&geometry), Some(GeometryTag::MultiPolygon));

        let collection = Geometry::new(Value::GeometryCollection(vec![]));
        assert_eq!(GeometryTag::of(&collection), None);
    }

    #[test]
    fn test_singular_folds_multi_variants() {
        assert_eq!(GeometryTag::MultiPoint.singular(), GeometryTag::Point);
        assert_eq!(
            GeometryTag::MultiLineString.singular(),
            GeometryTag::LineString
        );
        assert_eq!(GeometryTag::MultiPolygon.singular(), GeometryTag::Polygon);
        assert_eq!(GeometryTag::Point.singular(), GeometryTag::Point);
    }

    #[test]
    fn test_name_round_trips() {
        for tag in [
            GeometryTag::Point,
            GeometryTag::MultiPoint,
            GeometryTag::LineString,
            GeometryTag::MultiLineString,
            GeometryTag::Polygon,
            GeometryTag::MultiPolygon,
        ] {
            assert_eq!(GeometryTag::from_name(tag.name()), Some(tag));
        }
    }
}
