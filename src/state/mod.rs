//! Application state management.
//!
//! This module contains all state structures used throughout the application.
//! Map data lives in the engine; this state covers the panels around it.

mod import;

pub use import::{AddDataTab, ImportState};

/// Root application state containing all sub-states.
#[derive(Default)]
pub struct AppState {
    /// State for the Add Data panel
    pub import_state: ImportState,

    /// Application status message displayed in top bar
    pub status_message: String,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            status_message: "Ready".to_string(),
            ..Default::default()
        }
    }
}
