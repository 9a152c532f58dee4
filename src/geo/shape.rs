//! Renderable geometry extracted from GeoJSON.
//!
//! Sources convert their features once at registration so the canvas never
//! walks raw GeoJSON positions per frame.

use geo_types::Coord;
use geojson::{Geometry, PointType, Value};

use crate::geo::tag::GeometryTag;

/// A feature geometry in render-ready coordinate form.
#[derive(Debug, Clone)]
pub enum GeoShape {
    Point(Coord<f64>),
    MultiPoint(Vec<Coord<f64>>),
    LineString(Vec<Coord<f64>>),
    MultiLineString(Vec<Vec<Coord<f64>>>),
    Polygon {
        exterior: Vec<Coord<f64>>,
        holes: Vec<Vec<Coord<f64>>>,
    },
    MultiPolygon(Vec<(Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>)>),
}

impl GeoShape {
    /// Converts a parsed geometry into its tag and render shape.
    ///
    /// Returns `None` for geometry collections, degenerate polygons with no
    /// rings, and positions shorter than two ordinates.
    pub fn of(geometry: &Geometry) -> Option<(GeometryTag, GeoShape)> {
        let tag = GeometryTag::of(geometry)?;
        let shape = match &geometry.value {
            Value::Point(position) => GeoShape::Point(coord(position)?),
            Value::MultiPoint(positions) => GeoShape::MultiPoint(coords(positions)),
            Value::LineString(positions) => GeoShape::LineString(coords(positions)),
            Value::MultiLineString(lines) => {
                GeoShape::MultiLineString(lines.iter().map(|line| coords(line)).collect())
            }
            Value::Polygon(rings) => {
                let (exterior, holes) = split_rings(rings)?;
                GeoShape::Polygon { exterior, holes }
            }
            Value::MultiPolygon(polygons) => GeoShape::MultiPolygon(
                polygons
                    .iter()
                    .filter_map(|rings| split_rings(rings))
                    .collect(),
            ),
            Value::GeometryCollection(_) => return None,
        };
        Some((tag, shape))
    }
}

fn coord(position: &PointType) -> Option<Coord<f64>> {
    if position.len() < 2 {
        return None;
    }
    Some(Coord {
        x: position[0],
        y: position[1],
    })
}

fn coords(positions: &[PointType]) -> Vec<Coord<f64>> {
    positions.iter().filter_map(coord).collect()
}

fn split_rings(rings: &[Vec<PointType>]) -> Option<(Vec<Coord<f64>>, Vec<Vec<Coord<f64>>>)> {
    let (exterior, holes) = rings.split_first()?;
    Some((
        coords(exterior),
        holes.iter().map(|ring| coords(ring)).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversion() {
        let geometry = Geometry::new(Value::Point(vec![-100.0, 40.0]));
        let (tag, shape) = GeoShape::of(&geometry).unwrap();
        assert_eq!(tag, GeometryTag::Point);
        match shape {
            GeoShape::Point(c) => {
                assert_eq!(c.x, -100.0);
                assert_eq!(c.y, 40.0);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn test_multipoint_keeps_every_position() {
        let geometry = Geometry::new(Value::MultiPoint(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
            vec![2.0, 2.0],
        ]));
        let (tag, shape) = GeoShape::of(&geometry).unwrap();
        assert_eq!(tag, GeometryTag::MultiPoint);
        match shape {
            GeoShape::MultiPoint(points) => assert_eq!(points.len(), 3),
            other => panic!("expected multipoint, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_splits_exterior_and_holes() {
        let geometry = Geometry::new(Value::Polygon(vec![
            vec![
                vec![0.0, 0.0],
                vec![10.0, 0.0],
                vec![10.0, 10.0],
                vec![0.0, 0.0],
            ],
            vec![
                vec![2.0, 2.0],
                vec![4.0, 2.0],
                vec![4.0, 4.0],
                vec![2.0, 2.0],
            ],
        ]));
        let (_, shape) = GeoShape::of(&geometry).unwrap();
        match shape {
            GeoShape::Polygon { exterior, holes } => {
                assert_eq!(exterior.len(), 4);
                assert_eq!(holes.len(), 1);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_polygon_is_skipped() {
        let geometry = Geometry::new(Value::Polygon(vec![]));
        assert!(GeoShape::of(&geometry).is_none());
    }

    #[test]
    fn test_geometry_collection_is_skipped() {
        let geometry = Geometry::new(Value::GeometryCollection(vec![Geometry::new(
            Value::Point(vec![0.0, 0.0]),
        )]));
        assert!(GeoShape::of(&geometry).is_none());
    }
}
