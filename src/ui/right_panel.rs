//! Right panel UI: layer visibility toggles.
//!
//! The panel holds no state of its own. It lists the registry's layer ids
//! and reads/writes visibility through the engine on every frame.

use crate::map::{LayerRegistry, MapEngine};
use eframe::egui::{self, RichText, ScrollArea};

pub fn render_right_panel(ctx: &egui::Context, engine: &mut MapEngine, registry: &LayerRegistry) {
    egui::SidePanel::right("right_panel")
        .resizable(true)
        .default_width(220.0)
        .min_width(180.0)
        .max_width(350.0)
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Layers");
                ui.separator();

                if registry.is_empty() {
                    ui.label(
                        RichText::new("No layers yet. Import a file to add some.")
                            .small()
                            .color(egui::Color32::GRAY),
                    );
                    return;
                }

                for id in registry.ids() {
                    render_layer_toggle(ui, engine, id);
                }
            });
        });
}

fn render_layer_toggle(ui: &mut egui::Ui, engine: &mut MapEngine, id: &str) {
    let visibility = match engine.layout_visibility(id) {
        Ok(v) => v,
        Err(err) => {
            log::error!("layer '{}' missing from engine: {}", id, err);
            return;
        }
    };

    let mut checked = visibility.is_visible();
    if ui.checkbox(&mut checked, id).changed() {
        if let Err(err) = engine.set_layout_visibility(id, visibility.toggled()) {
            log::error!("failed to toggle layer '{}': {}", id, err);
        }
    }
}
