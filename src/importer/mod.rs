//! Background parsing of picked geodata files.
//!
//! Parsing runs off the UI thread; the parsed collection comes back through
//! a channel polled in update(), the same way file picks do.

mod formats;

pub use formats::{parse, source_id, SUPPORTED_EXTENSIONS};

use eframe::egui;
use geojson::FeatureCollection;
use std::sync::mpsc::{channel, Receiver, Sender};
use thiserror::Error;

/// Errors surfaced while turning file bytes into features.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported file format '{0}'")]
    UnsupportedFormat(String),
    #[error("file is not valid UTF-8")]
    InvalidEncoding,
    #[error("GeoJSON parse failed: {0}")]
    Geojson(#[from] geojson::Error),
    #[error("shapefile parse failed: {0}")]
    Shapefile(String),
}

/// A successfully parsed import, ready for engine registration.
pub struct ParsedImport {
    pub source_id: String,
    pub file_name: String,
    pub collection: FeatureCollection,
}

/// Channel-based background parser.
pub struct ImportChannel {
    sender: Sender<Result<ParsedImport, ImportError>>,
    receiver: Receiver<Result<ParsedImport, ImportError>>,
}

impl Default for ImportChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Parses file bytes on a worker thread.
    ///
    /// The result is sent through the channel and ctx.request_repaint() is
    /// called so update() picks it up promptly.
    pub fn parse_file(&self, ctx: egui::Context, file_name: String, bytes: Vec<u8>) {
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = parse(&file_name, &bytes).map(|collection| ParsedImport {
                source_id: source_id(&file_name),
                file_name,
                collection,
            });
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Non-blocking check for a completed parse.
    pub fn try_recv(&self) -> Option<Result<ParsedImport, ImportError>> {
        self.receiver.try_recv().ok()
    }
}
