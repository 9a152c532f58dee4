//! The in-process map engine.
//!
//! `MapEngine` owns every registered source and layer plus the camera. All
//! calls are synchronous; registration order is preserved, so layers render
//! in the order they were added.

mod layer;
mod projection;
mod renderer;

pub use layer::{collect_layer_specs, materialize, LayerRegistry, LayerSpec, Visibility};
pub use projection::MapProjection;
pub use renderer::render_map;

use eframe::egui::Vec2;
use geojson::FeatureCollection;
use thiserror::Error;

use crate::geo::{Bounds, GeoShape, GeometryTag};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 10.0;
const ZOOM_STEP: f32 = 1.25;

/// Errors surfaced by engine registration and lookup calls.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("source '{0}' is already registered")]
    DuplicateSource(String),
    #[error("layer '{0}' is already registered")]
    DuplicateLayer(String),
    #[error("source '{0}' is not registered")]
    UnknownSource(String),
    #[error("layer '{0}' is not registered")]
    UnknownLayer(String),
}

/// A registered data source: the collection plus its render shapes.
#[derive(Debug)]
pub struct Source {
    id: String,
    data: FeatureCollection,
    shapes: Vec<(GeometryTag, GeoShape)>,
}

impl Source {
    pub fn data(&self) -> &FeatureCollection {
        &self.data
    }

    pub fn shapes(&self) -> &[(GeometryTag, GeoShape)] {
        &self.shapes
    }
}

/// Camera state for the canvas view.
#[derive(Debug, Clone)]
pub struct Camera {
    pub center_lon: f64,
    pub center_lat: f64,
    /// Visible lat/lon span in degrees at zoom 1.
    pub range_deg: f64,
    pub zoom: f32,
    pub pan_offset: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center_lon: 0.0,
            center_lat: 0.0,
            range_deg: 90.0,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        }
    }
}

/// Owns sources, layers, and the camera.
#[derive(Debug, Default)]
pub struct MapEngine {
    sources: Vec<Source>,
    layers: Vec<LayerSpec>,
    camera: Camera,
}

impl MapEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a feature collection under an id.
    ///
    /// Features are converted to render shapes once here; unclassifiable
    /// geometries are dropped from the shape list but stay in the data.
    pub fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
        if self.sources.iter().any(|s| s.id == id) {
            return Err(MapError::DuplicateSource(id.to_string()));
        }

        let shapes = data
            .features
            .iter()
            .filter_map(|f| f.geometry.as_ref())
            .filter_map(GeoShape::of)
            .collect::<Vec<_>>();
        log::debug!("registered source '{}' with {} shape(s)", id, shapes.len());

        self.sources.push(Source {
            id: id.to_string(),
            data,
            shapes,
        });
        Ok(())
    }

    /// Registers a styled layer over an existing source.
    pub fn add_layer(&mut self, spec: LayerSpec) -> Result<(), MapError> {
        if self.layers.iter().any(|l| l.id == spec.id) {
            return Err(MapError::DuplicateLayer(spec.id.clone()));
        }
        if !self.sources.iter().any(|s| s.id == spec.source) {
            return Err(MapError::UnknownSource(spec.source.clone()));
        }
        log::debug!("registered layer: {}", spec.to_style_json());
        self.layers.push(spec);
        Ok(())
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Reads a layer's current visibility.
    pub fn layout_visibility(&self, id: &str) -> Result<Visibility, MapError> {
        self.layers
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.visibility)
            .ok_or_else(|| MapError::UnknownLayer(id.to_string()))
    }

    /// Writes a layer's visibility.
    pub fn set_layout_visibility(&mut self, id: &str, value: Visibility) -> Result<(), MapError> {
        let layer = self
            .layers
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| MapError::UnknownLayer(id.to_string()))?;
        layer.visibility = value;
        Ok(())
    }

    /// Repositions the camera so the bounds fill the view.
    ///
    /// Resets zoom and pan so the fit is deterministic regardless of prior
    /// interaction.
    pub fn fit_bounds(&mut self, bounds: Bounds) {
        let (center_lon, center_lat) = bounds.center();
        let lat_correction = center_lat.to_radians().cos().max(0.01);

        let half_width = bounds.width() / 2.0;
        let half_height = bounds.height() / 2.0;
        // 10% padding around the data; floor keeps single points viewable.
        let range = ((half_width * lat_correction).max(half_height) * 1.1).max(0.01);

        self.camera.center_lon = center_lon;
        self.camera.center_lat = center_lat;
        self.camera.range_deg = range;
        self.camera.zoom = 1.0;
        self.camera.pan_offset = Vec2::ZERO;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom = (self.camera.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom = (self.camera.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset_view(&mut self) {
        self.camera.zoom = 1.0;
        self.camera.pan_offset = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, Geometry, Value};

    fn point_collection() -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![0.0, 0.0]))),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            foreign_members: None,
        }
    }

    #[test]
    fn test_duplicate_source_is_rejected() {
        let mut engine = MapEngine::new();
        engine.add_source("parks", point_collection()).unwrap();
        assert_eq!(
            engine.add_source("parks", point_collection()),
            Err(MapError::DuplicateSource("parks".to_string()))
        );
        assert!(engine.source("parks").is_some());
    }

    #[test]
    fn test_duplicate_layer_is_rejected() {
        let mut engine = MapEngine::new();
        engine.add_source("parks", point_collection()).unwrap();
        let spec = LayerSpec::new("parks", GeometryTag::Point);
        engine.add_layer(spec.clone()).unwrap();
        assert_eq!(
            engine.add_layer(spec),
            Err(MapError::DuplicateLayer("parks-Point".to_string()))
        );
        assert_eq!(engine.layers().len(), 1);
    }

    #[test]
    fn test_layer_requires_known_source() {
        let mut engine = MapEngine::new();
        assert_eq!(
            engine.add_layer(LayerSpec::new("missing", GeometryTag::Point)),
            Err(MapError::UnknownSource("missing".to_string()))
        );
    }

    #[test]
    fn test_visibility_round_trip() {
        let mut engine = MapEngine::new();
        engine.add_source("parks", point_collection()).unwrap();
        engine
            .add_layer(LayerSpec::new("parks", GeometryTag::Point))
            .unwrap();

        let initial = engine.layout_visibility("parks-Point").unwrap();
        assert_eq!(initial, Visibility::Visible);

        engine
            .set_layout_visibility("parks-Point", initial.toggled())
            .unwrap();
        assert_eq!(
            engine.layout_visibility("parks-Point").unwrap(),
            Visibility::None
        );

        let toggled = engine.layout_visibility("parks-Point").unwrap();
        engine
            .set_layout_visibility("parks-Point", toggled.toggled())
            .unwrap();
        assert_eq!(engine.layout_visibility("parks-Point").unwrap(), initial);
    }

    #[test]
    fn test_unknown_layer_visibility_errors() {
        let mut engine = MapEngine::new();
        assert_eq!(
            engine.layout_visibility("ghost"),
            Err(MapError::UnknownLayer("ghost".to_string()))
        );
        assert_eq!(
            engine.set_layout_visibility("ghost", Visibility::None),
            Err(MapError::UnknownLayer("ghost".to_string()))
        );
    }

    #[test]
    fn test_fit_bounds_centers_camera() {
        let mut engine = MapEngine::new();
        engine.zoom_in();
        engine.camera_mut().pan_offset = Vec2::new(50.0, -20.0);

        engine.fit_bounds(Bounds {
            min_x: -10.0,
            min_y: 20.0,
            max_x: 10.0,
            max_y: 40.0,
        });

        let camera = engine.camera();
        assert_eq!(camera.center_lon, 0.0);
        assert_eq!(camera.center_lat, 30.0);
        assert_eq!(camera.zoom, 1.0);
        assert_eq!(camera.pan_offset, Vec2::ZERO);
        assert!(camera.range_deg >= 10.0);
    }

    #[test]
    fn test_zoom_clamps_to_limits() {
        let mut engine = MapEngine::new();
        for _ in 0..100 {
            engine.zoom_in();
        }
        assert_eq!(engine.camera().zoom, MAX_ZOOM);
        for _ in 0..100 {
            engine.zoom_out();
        }
        assert_eq!(engine.camera().zoom, MIN_ZOOM);
    }

    #[test]
    fn test_source_shapes_skip_unclassifiable_geometry() {
        let mut engine = MapEngine::new();
        let collection = FeatureCollection {
            bbox: None,
            features: vec![
                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::Point(vec![1.0, 2.0]))),
                    id: None,
                    properties: None,
                    foreign_members: None,
                },
                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(Value::GeometryCollection(vec![]))),
                    id: None,
                    properties: None,
                    foreign_members: None,
                },
                Feature {
                    bbox: None,
                    geometry: None,
                    id: None,
                    properties: None,
                    foreign_members: None,
                },
            ],
            foreign_members: None,
        };
        engine.add_source("mixed", collection).unwrap();
        assert_eq!(engine.source("mixed").unwrap().shapes().len(), 1);
        assert_eq!(engine.source("mixed").unwrap().data().features.len(), 3);
    }
}
