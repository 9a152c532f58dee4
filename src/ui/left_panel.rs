//! Left panel UI: Add Data controls.

use crate::file_ops::FilePickerChannel;
use crate::importer::SUPPORTED_EXTENSIONS;
use crate::state::{AddDataTab, AppState};
use eframe::egui::{self, RichText};

pub fn render_left_panel(
    ctx: &egui::Context,
    state: &mut AppState,
    file_picker: &FilePickerChannel,
) {
    egui::SidePanel::left("left_panel")
        .resizable(true)
        .default_width(250.0)
        .min_width(200.0)
        .max_width(400.0)
        .show(ctx, |ui| {
            ui.heading("Add Data");
            ui.separator();

            ui.horizontal(|ui| {
                for tab in AddDataTab::all() {
                    ui.selectable_value(&mut state.import_state.tab, tab, tab.label());
                }
            });
            ui.separator();

            match state.import_state.tab {
                AddDataTab::File => render_file_tab(ui, ctx, state, file_picker),
                AddDataTab::Url => render_url_tab(ui, state),
            }
        });
}

fn render_file_tab(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    state: &mut AppState,
    file_picker: &FilePickerChannel,
) {
    ui.label(
        RichText::new(format!("Supported: {}", SUPPORTED_EXTENSIONS.join(", ")))
            .small()
            .color(egui::Color32::GRAY),
    );
    ui.add_space(5.0);

    let is_busy = state.import_state.is_busy();

    ui.add_enabled_ui(!is_busy, |ui| {
        if ui.button("Choose file...").clicked() {
            state.import_state.picking = true;
            state.status_message = "Opening file dialog...".to_string();
            file_picker.pick_file(ctx.clone());
        }
    });

    if is_busy {
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.spinner();
            let label = if state.import_state.picking {
                "Selecting file..."
            } else {
                "Importing..."
            };
            ui.label(label);
        });
    }

    ui.add_space(10.0);

    if let Some(ref name) = state.import_state.file_name {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("\u{2713}").color(egui::Color32::from_rgb(100, 200, 100)));
                ui.label(RichText::new("File selected").small());
            });
            ui.label(RichText::new(name).strong().monospace());

            if let Some(size) = state.import_state.file_size {
                ui.label(format_file_size(size));
            }
        });
    }
}

fn render_url_tab(ui: &mut egui::Ui, state: &mut AppState) {
    ui.label(RichText::new("Load data from a URL").small());
    ui.add_space(5.0);

    ui.add(
        egui::TextEdit::singleline(&mut state.import_state.url_input)
            .hint_text("Paste URL here")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(5.0);

    if ui.button("Add Layer").clicked() {
        log::warn!("URL import requested but not implemented");
        state.status_message = "URL import is not implemented".to_string();
    }
}

fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
