//! Floating zoom controls over the canvas.

use crate::map::MapEngine;
use eframe::egui::{self, Rect, Vec2};

pub fn render_zoom_controls(ui: &mut egui::Ui, rect: &Rect, engine: &mut MapEngine) {
    let controls_rect = Rect::from_min_size(
        rect.right_top() + Vec2::new(-46.0, 10.0),
        Vec2::new(36.0, 70.0),
    );

    ui.scope_builder(egui::UiBuilder::new().max_rect(controls_rect), |ui| {
        ui.vertical(|ui| {
            if ui.add_sized([28.0, 28.0], egui::Button::new("+")).clicked() {
                engine.zoom_in();
            }
            if ui
                .add_sized([28.0, 28.0], egui::Button::new("\u{2212}"))
                .clicked()
            {
                engine.zoom_out();
            }
        });
    });
}
