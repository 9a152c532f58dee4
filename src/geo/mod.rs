//! Geometry classification and styling.
//!
//! This module turns GeoJSON features into render categories, paint and
//! filter constants, bounding boxes, and render-ready shapes. Everything
//! here is pure; the map engine owns the mutable state.

mod bbox;
mod shape;
mod style;
mod tag;

pub use bbox::{bbox, Bounds};
pub use shape::GeoShape;
pub use style::{GeometryFilter, PaintSpec};
pub use tag::{classify, GeometryTag, RenderCategory};
