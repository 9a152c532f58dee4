//! Layer rendering to the egui canvas.
//!
//! Walks engine layers in creation order (back to front), resolves each
//! layer's source, and paints the shapes that pass the layer's filter.

use eframe::egui::{Color32, Painter, Pos2, Shape, Stroke};
use geo_types::Coord;

use crate::geo::{GeoShape, PaintSpec};
use crate::map::{MapEngine, MapProjection};

/// Renders all visible layers of the engine.
pub fn render_map(painter: &Painter, engine: &MapEngine, projection: &MapProjection) {
    for layer in engine.layers() {
        if !layer.visibility.is_visible() {
            continue;
        }
        let Some(source) = engine.source(&layer.source) else {
            continue;
        };
        for (tag, shape) in source.shapes() {
            if layer.filter.matches(*tag) {
                render_shape(painter, shape, &layer.paint, projection);
            }
        }
    }
}

fn render_shape(
    painter: &Painter,
    shape: &GeoShape,
    paint: &PaintSpec,
    projection: &MapProjection,
) {
    match paint {
        PaintSpec::Circle {
            radius,
            color,
            opacity,
        } => {
            let fill = paint_color(color, *opacity);
            match shape {
                GeoShape::Point(coord) => render_circle(painter, *coord, *radius, fill, projection),
                GeoShape::MultiPoint(points) => {
                    for coord in points {
                        render_circle(painter, *coord, *radius, fill, projection);
                    }
                }
                _ => {}
            }
        }
        PaintSpec::Line { color, width } => {
            let stroke = Stroke::new(*width as f32, paint_color(color, 1.0));
            match shape {
                GeoShape::LineString(coords) => render_line(painter, coords, stroke, projection),
                GeoShape::MultiLineString(lines) => {
                    for coords in lines {
                        render_line(painter, coords, stroke, projection);
                    }
                }
                _ => {}
            }
        }
        PaintSpec::Fill { color, opacity } => {
            let fill = paint_color(color, *opacity);
            match shape {
                GeoShape::Polygon { exterior, .. } => {
                    render_fill(painter, exterior, fill, projection);
                }
                GeoShape::MultiPolygon(polygons) => {
                    for (exterior, _holes) in polygons {
                        render_fill(painter, exterior, fill, projection);
                    }
                }
                _ => {}
            }
        }
    }
}

fn render_circle(
    painter: &Painter,
    coord: Coord<f64>,
    radius: f64,
    fill: Color32,
    projection: &MapProjection,
) {
    if !projection.is_visible(coord, 0.5) {
        return;
    }
    painter.circle_filled(projection.geo_to_screen(coord), radius as f32, fill);
}

fn render_line(
    painter: &Painter,
    coords: &[Coord<f64>],
    stroke: Stroke,
    projection: &MapProjection,
) {
    if coords.len() < 2 {
        return;
    }
    let points: Vec<Pos2> = coords.iter().map(|c| projection.geo_to_screen(*c)).collect();
    painter.add(Shape::line(points, stroke));
}

fn render_fill(
    painter: &Painter,
    exterior: &[Coord<f64>],
    fill: Color32,
    projection: &MapProjection,
) {
    if exterior.len() < 3 {
        return;
    }
    let points: Vec<Pos2> = exterior
        .iter()
        .map(|c| projection.geo_to_screen(*c))
        .collect();
    // Holes are not cut out; that would need tessellation.
    painter.add(Shape::convex_polygon(points, fill, Stroke::NONE));
}

/// Parses a CSS color and applies a fill opacity.
fn paint_color(hex: &str, opacity: f64) -> Color32 {
    match csscolorparser::parse(hex) {
        Ok(color) => {
            let [r, g, b, a] = color.to_rgba8();
            let alpha = (a as f64 * opacity.clamp(0.0, 1.0)) as u8;
            Color32::from_rgba_unmultiplied(r, g, b, alpha)
        }
        Err(err) => {
            log::warn!("unparseable paint color '{}': {}", hex, err);
            Color32::GRAY
        }
    }
}
