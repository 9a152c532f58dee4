//! Central canvas UI: map rendering area.

use crate::map::{render_map, MapEngine, MapProjection, MAX_ZOOM, MIN_ZOOM};
use eframe::egui::{self, Color32, Rect, Sense};

use super::zoom::render_zoom_controls;

pub fn render_canvas(ctx: &egui::Context, engine: &mut MapEngine) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();

        // Allocate the full available space for the canvas
        let (response, painter) = ui.allocate_painter(available_size, Sense::click_and_drag());
        let rect = response.rect;

        // Draw background
        painter.rect_filled(rect, 0.0, Color32::from_rgb(20, 20, 35));

        let projection = MapProjection::for_camera(engine.camera(), rect);
        render_map(&painter, engine, &projection);

        render_zoom_controls(ui, &rect, engine);

        handle_canvas_interaction(&response, &rect, engine);
    });
}

fn handle_canvas_interaction(response: &egui::Response, rect: &Rect, engine: &mut MapEngine) {
    // Handle dragging for panning
    if response.dragged() {
        engine.camera_mut().pan_offset += response.drag_delta();
    }

    // Handle scroll for zooming relative to cursor position
    if response.hovered() {
        let scroll_delta = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll_delta.y != 0.0 {
            let old_zoom = engine.camera().zoom;
            let zoom_factor = 1.0 + scroll_delta.y * 0.001;
            let new_zoom = (old_zoom * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);

            // Adjust pan offset to keep the point under cursor stationary
            if let Some(cursor_pos) = response.hover_pos() {
                let cursor_rel = cursor_pos - rect.center();
                let ratio = new_zoom / old_zoom;
                let camera = engine.camera_mut();
                camera.pan_offset = cursor_rel * (1.0 - ratio) + camera.pan_offset * ratio;
            }

            engine.camera_mut().zoom = new_zoom;
        }
    }

    // Reset view on double-click
    if response.double_clicked() {
        engine.reset_view();
    }
}
