//! Format detection and parsing into a feature collection.

use std::io::Cursor;
use std::path::Path;

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use shapefile::PolygonRing;

use super::ImportError;

/// File extensions the importer can parse, as shown in the Add Data panel.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[".geojson", ".json", ".shp"];

/// Parses file bytes into a feature collection, dispatching on extension.
pub fn parse(file_name: &str, bytes: &[u8]) -> Result<FeatureCollection, ImportError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "geojson" | "json" => parse_geojson(bytes),
        "shp" => parse_shapefile(bytes),
        _ => Err(ImportError::UnsupportedFormat(file_name.to_string())),
    }
}

/// Derives the engine source id from a file name: the stem without extension.
pub fn source_id(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// Parses GeoJSON text. A bare Feature or Geometry is wrapped into a
/// single-feature collection so downstream code sees one shape of input.
fn parse_geojson(bytes: &[u8]) -> Result<FeatureCollection, ImportError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ImportError::InvalidEncoding)?;
    let geojson: GeoJson = text.parse()?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(geometry) => FeatureCollection {
            bbox: None,
            features: vec![feature_of(geometry)],
            foreign_members: None,
        },
    };
    Ok(collection)
}

/// Parses shapefile geometry records into GeoJSON features.
///
/// Attribute records (.dbf) are not available from a single picked file, so
/// features carry geometry only.
fn parse_shapefile(bytes: &[u8]) -> Result<FeatureCollection, ImportError> {
    let cursor = Cursor::new(bytes);
    let mut reader = shapefile::ShapeReader::new(cursor)
        .map_err(|e| ImportError::Shapefile(e.to_string()))?;

    let mut features = Vec::new();
    for result in reader.iter_shapes() {
        let shape = result.map_err(|e| ImportError::Shapefile(e.to_string()))?;
        if let Some(geometry) = convert_shape(&shape) {
            features.push(feature_of(geometry));
        }
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn convert_shape(shape: &shapefile::Shape) -> Option<Geometry> {
    let value = match shape {
        shapefile::Shape::Point(p) => Value::Point(vec![p.x, p.y]),
        shapefile::Shape::Multipoint(mp) => {
            Value::MultiPoint(mp.points().iter().map(|p| vec![p.x, p.y]).collect())
        }
        shapefile::Shape::Polyline(pl) => {
            let parts = pl.parts();
            if parts.len() == 1 {
                Value::LineString(parts[0].iter().map(|p| vec![p.x, p.y]).collect())
            } else {
                Value::MultiLineString(
                    parts
                        .iter()
                        .map(|part| part.iter().map(|p| vec![p.x, p.y]).collect())
                        .collect(),
                )
            }
        }
        shapefile::Shape::Polygon(poly) => {
            let mut outer_rings: Vec<Vec<Vec<f64>>> = Vec::new();
            let mut holes: Vec<Vec<Vec<f64>>> = Vec::new();

            for ring in poly.rings() {
                let positions: Vec<Vec<f64>> =
                    ring.points().iter().map(|p| vec![p.x, p.y]).collect();
                match ring {
                    PolygonRing::Outer(_) => outer_rings.push(positions),
                    PolygonRing::Inner(_) => holes.push(positions),
                }
            }

            if outer_rings.is_empty() {
                return None;
            }

            if outer_rings.len() == 1 {
                let mut rings = vec![outer_rings.remove(0)];
                rings.extend(holes);
                Value::Polygon(rings)
            } else {
                // Holes are not re-associated with their outer rings.
                Value::MultiPolygon(outer_rings.into_iter().map(|ring| vec![ring]).collect())
            }
        }
        shapefile::Shape::NullShape => return None,
        _ => return None,
    };
    Some(Geometry::new(value))
}

fn feature_of(geometry: Geometry) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeometryTag;

    #[test]
    fn test_parse_geojson_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-122.4, 37.8] },
                    "properties": { "name": "pier" }
                }
            ]
        }"#;
        let collection = parse("parks.geojson", text.as_bytes()).unwrap();
        assert_eq!(collection.features.len(), 1);
        let geometry = collection.features[0].geometry.as_ref().unwrap();
        assert_eq!(GeometryTag::of(geometry), Some(GeometryTag::Point));
    }

    #[test]
    fn test_parse_bare_geometry_is_wrapped() {
        let text = r#"{ "type": "LineString", "coordinates": [[0, 0], [1, 1]] }"#;
        let collection = parse("trail.json", text.as_bytes()).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn test_parse_bare_feature_is_wrapped() {
        let text = r#"{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [1, 2] },
            "properties": null
        }"#;
        let collection = parse("spot.geojson", text.as_bytes()).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = parse("layers.kml", b"<kml/>");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        assert!(matches!(
            parse("README", b"hello"),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_geojson() {
        assert!(matches!(
            parse("bad.geojson", &[0xff, 0xfe, 0x00]),
            Err(ImportError::InvalidEncoding)
        ));
    }

    #[test]
    fn test_malformed_geojson() {
        assert!(matches!(
            parse("bad.json", b"{ not geojson"),
            Err(ImportError::Geojson(_))
        ));
    }

    #[test]
    fn test_source_id_strips_extension() {
        assert_eq!(source_id("parks.geojson"), "parks");
        assert_eq!(source_id("coastline.shp"), "coastline");
        assert_eq!(source_id("data.v2.json"), "data.v2");
        assert_eq!(source_id("noext"), "noext");
    }
}
