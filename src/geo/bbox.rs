//! Bounding-box computation over feature collections.

use geojson::{FeatureCollection, Geometry, PointType, Value};

/// An axis-aligned geographic bounding box in lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Computes the bounding box of all positions in a collection.
///
/// Returns `None` when the collection has no features with geometry, so
/// callers can skip the camera fit instead of jumping to a degenerate box.
pub fn bbox(collection: &FeatureCollection) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for feature in &collection.features {
        if let Some(geometry) = &feature.geometry {
            fold_geometry(geometry, &mut bounds);
        }
    }
    bounds
}

fn fold_geometry(geometry: &Geometry, bounds: &mut Option<Bounds>) {
    match &geometry.value {
        Value::Point(position) => fold_position(position, bounds),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            for position in positions {
                fold_position(position, bounds);
            }
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            for line in lines {
                for position in line {
                    fold_position(position, bounds);
                }
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                for ring in rings {
                    for position in ring {
                        fold_position(position, bounds);
                    }
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                fold_geometry(g, bounds);
            }
        }
    }
}

fn fold_position(position: &PointType, bounds: &mut Option<Bounds>) {
    if position.len() < 2 {
        return;
    }
    let (x, y) = (position[0], position[1]);
    match bounds {
        Some(b) => {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        None => {
            *bounds = Some(Bounds {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            });
        }
    }
}
