#![warn(clippy::all)]

//! Geodata Workbench - An interactive vector geodata styling tool.
//!
//! This application imports vector geodata files (GeoJSON, shapefile) and
//! styles them as map layers, one layer per geometry type, with visibility
//! toggles and a pan/zoom canvas.

mod file_ops;
mod geo;
mod importer;
mod map;
mod state;
mod ui;

use eframe::egui;
use file_ops::FilePickerChannel;
use importer::{ImportChannel, ParsedImport};
use map::{materialize, LayerRegistry, MapEngine};
use state::AppState;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Geodata Workbench",
        native_options,
        Box::new(|cc| Ok(Box::new(WorkbenchApp::new(cc)))),
    )
}

/// Main application state and logic.
pub struct WorkbenchApp {
    /// Application state containing all sub-states
    state: AppState,

    /// The map engine holding sources, layers, and the camera
    engine: MapEngine,

    /// Ids of layers created by imports, in creation order
    registry: LayerRegistry,

    /// Channel for async file picker operations
    file_picker: FilePickerChannel,

    /// Channel for background file parsing
    import_channel: ImportChannel,
}

impl WorkbenchApp {
    /// Creates a new WorkbenchApp instance.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            state: AppState::new(),
            engine: MapEngine::new(),
            registry: LayerRegistry::new(),
            file_picker: FilePickerChannel::new(),
            import_channel: ImportChannel::new(),
        }
    }

    /// Registers a parsed import with the engine: source, layers, camera fit.
    fn handle_import(&mut self, import: ParsedImport) {
        let ParsedImport {
            source_id,
            file_name,
            collection,
        } = import;

        if collection.features.is_empty() {
            log::warn!("no features found in {}", file_name);
            self.state.status_message = format!("No features found in {}", file_name);
            return;
        }

        // Compute bounds before the engine takes ownership of the data.
        let bounds = geo::bbox(&collection);

        if let Err(e) = self.engine.add_source(&source_id, collection) {
            log::error!("failed to register source '{}': {}", source_id, e);
            self.state.status_message = format!("Import failed: {}", e);
            return;
        }

        match materialize(&mut self.engine, &mut self.registry, &source_id) {
            Ok(created) => {
                log::info!("created {} layer(s) for source '{}'", created.len(), source_id);
                self.state.status_message =
                    format!("Added {} layer(s) from {}", created.len(), file_name);
            }
            Err(e) => {
                // Layers registered before the failure stay in place.
                log::error!("layer registration failed for '{}': {}", source_id, e);
                self.state.status_message = format!("Import failed: {}", e);
                return;
            }
        }

        // Fit only once every layer for the import is registered.
        if let Some(bounds) = bounds {
            self.engine.fit_bounds(bounds);
        }
    }
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed file pick operations
        if let Some(result) = self.file_picker.try_recv() {
            self.state.import_state.picking = false;
            match result {
                Some(file_result) => {
                    self.state.import_state.file_name = Some(file_result.file_name.clone());
                    self.state.import_state.file_size = Some(file_result.file_size);
                    self.state.import_state.importing = true;
                    self.state.status_message =
                        format!("Importing {}...", file_result.file_name);
                    self.import_channel.parse_file(
                        ctx.clone(),
                        file_result.file_name,
                        file_result.file_data,
                    );
                }
                None => {
                    // User cancelled the file dialog
                    self.state.status_message = "File selection cancelled".to_string();
                }
            }
        }

        // Check for completed parse operations
        if let Some(result) = self.import_channel.try_recv() {
            self.state.import_state.importing = false;
            match result {
                Ok(import) => self.handle_import(import),
                Err(e) => {
                    log::error!("import failed: {}", e);
                    self.state.status_message = format!("Import failed: {}", e);
                }
            }
        }

        // Render UI panels in the correct order for egui layout
        // Side and top/bottom panels must be rendered before CentralPanel
        ui::render_top_bar(ctx, &mut self.state);
        ui::render_left_panel(ctx, &mut self.state, &self.file_picker);
        ui::render_right_panel(ctx, &mut self.engine, &self.registry);
        ui::render_canvas(ctx, &mut self.engine);
    }
}
