//! UI modules for the Geodata Workbench application.
//!
//! The UI is split into distinct panels:
//! - Top bar: Title and status
//! - Left panel: Add Data controls (File and URL tabs)
//! - Central canvas: Map rendering with zoom controls
//! - Right panel: Layer visibility toggles

mod canvas;
mod left_panel;
mod right_panel;
mod top_bar;
mod zoom;

pub use canvas::render_canvas;
pub use left_panel::render_left_panel;
pub use right_panel::render_right_panel;
pub use top_bar::render_top_bar;
