//! Map projection and coordinate transformation.
//!
//! Converts between geographic coordinates (lon/lat) and screen positions
//! for the canvas. A simple equirectangular projection with a latitude
//! correction is adequate for a styling workbench.

use eframe::egui::{Pos2, Rect, Vec2};
use geo_types::Coord;

use crate::map::Camera;

/// Projection derived from the camera and the canvas rectangle.
#[derive(Debug, Clone)]
pub struct MapProjection {
    center_lon: f64,
    center_lat: f64,
    range_deg: f64,
    zoom: f32,
    pan_offset: Vec2,
    screen_rect: Rect,
}

impl MapProjection {
    pub fn for_camera(camera: &Camera, screen_rect: Rect) -> Self {
        Self {
            center_lon: camera.center_lon,
            center_lat: camera.center_lat,
            range_deg: camera.range_deg,
            zoom: camera.zoom,
            pan_offset: camera.pan_offset,
            screen_rect,
        }
    }

    /// Converts geographic coordinates (lon, lat) to a screen position.
    pub fn geo_to_screen(&self, coord: Coord<f64>) -> Pos2 {
        let effective_range = self.range_deg / self.zoom as f64;

        let rel_lon = coord.x - self.center_lon;
        let rel_lat = coord.y - self.center_lat;

        // Latitude correction narrows longitude spans away from the equator.
        let lat_correction = self.center_lat.to_radians().cos();
        let corrected_lon = rel_lon * lat_correction;

        let norm_x = corrected_lon / effective_range;
        // Flip Y since screen Y increases downward.
        let norm_y = -rel_lat / effective_range;

        let center = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        Pos2::new(
            center.x + (norm_x as f32) * half_size,
            center.y + (norm_y as f32) * half_size,
        )
    }

    /// Converts a screen position to geographic coordinates (lon, lat).
    pub fn screen_to_geo(&self, pos: Pos2) -> Coord<f64> {
        let effective_range = self.range_deg / self.zoom as f64;

        let center = self.screen_rect.center() + self.pan_offset;
        let half_size = self.screen_rect.size().min_elem() / 2.0;

        let norm_x = (pos.x - center.x) / half_size;
        let norm_y = (pos.y - center.y) / half_size;

        let lat_correction = self.center_lat.to_radians().cos();
        let rel_lon = (norm_x as f64) * effective_range / lat_correction;
        let rel_lat = -(norm_y as f64) * effective_range;

        Coord {
            x: self.center_lon + rel_lon,
            y: self.center_lat + rel_lat,
        }
    }

    /// Returns the visible bounds as (min_lon, min_lat, max_lon, max_lat).
    pub fn visible_bounds(&self) -> (f64, f64, f64, f64) {
        let top_left = self.screen_to_geo(self.screen_rect.left_top());
        let bottom_right = self.screen_to_geo(self.screen_rect.right_bottom());

        (
            top_left.x.min(bottom_right.x),
            top_left.y.min(bottom_right.y),
            top_left.x.max(bottom_right.x),
            top_left.y.max(bottom_right.y),
        )
    }

    /// Whether a coordinate lies within the visible bounds plus margin.
    pub fn is_visible(&self, coord: Coord<f64>, margin_deg: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.visible_bounds();
        coord.x >= min_lon - margin_deg
            && coord.x <= max_lon + margin_deg
            && coord.y >= min_lat - margin_deg
            && coord.y <= max_lat + margin_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_projection() -> MapProjection {
        let camera = Camera {
            center_lon: 0.0,
            center_lat: 0.0,
            range_deg: 90.0,
            zoom: 1.0,
            pan_offset: Vec2::ZERO,
        };
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        MapProjection::for_camera(&camera, rect)
    }

    #[test]
    fn test_center_maps_to_screen_center() {
        let projection = test_projection();
        let pos = projection.geo_to_screen(Coord { x: 0.0, y: 0.0 });
        assert_eq!(pos, Pos2::new(400.0, 300.0));
    }

    #[test]
    fn test_screen_round_trip() {
        let projection = test_projection();
        let coord = Coord { x: 12.5, y: -33.0 };
        let back = projection.screen_to_geo(projection.geo_to_screen(coord));
        assert!((back.x - coord.x).abs() < 1e-6);
        assert!((back.y - coord.y).abs() < 1e-6);
    }

    #[test]
    fn test_north_is_up() {
        let projection = test_projection();
        let north = projection.geo_to_screen(Coord { x: 0.0, y: 10.0 });
        let south = projection.geo_to_screen(Coord { x: 0.0, y: -10.0 });
        assert!(north.y < south.y);
    }

    #[test]
    fn test_zoom_magnifies_offsets() {
        let camera = Camera {
            zoom: 2.0,
            ..Camera::default()
        };
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let zoomed = MapProjection::for_camera(&camera, rect);
        let base = test_projection();

        let coord = Coord { x: 10.0, y: 0.0 };
        let base_dx = base.geo_to_screen(coord).x - 400.0;
        let zoomed_dx = zoomed.geo_to_screen(coord).x - 400.0;
        assert!((zoomed_dx - base_dx * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_is_visible_respects_margin() {
        let projection = test_projection();
        assert!(projection.is_visible(Coord { x: 0.0, y: 0.0 }, 0.0));
        assert!(!projection.is_visible(Coord { x: 179.0, y: 0.0 }, 0.0));
        assert!(projection.is_visible(Coord { x: 91.0, y: 0.0 }, 180.0));
    }
}
