//! Layer specs and materialization.
//!
//! An imported source gets one layer per distinct geometry type, in the
//! order the types first appear in the data. Layer ids follow the
//! `{source}-{type}` convention, so a `parks` source with points and
//! polygons yields `parks-Point` and `parks-Polygon`.

use geojson::FeatureCollection;
use serde::Serialize;
use serde_json::{json, Value};

use crate::geo::{GeometryFilter, GeometryTag, PaintSpec, RenderCategory};
use crate::map::{MapEngine, MapError};

/// Layer layout visibility, serialized as the engine's `visible`/`none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    None,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }

    pub fn toggled(&self) -> Visibility {
        match self {
            Visibility::Visible => Visibility::None,
            Visibility::None => Visibility::Visible,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Visible => "visible",
            Visibility::None => "none",
        }
    }
}

/// A styled layer over a registered source.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub category: RenderCategory,
    pub paint: PaintSpec,
    pub filter: GeometryFilter,
    pub visibility: Visibility,
}

impl LayerSpec {
    /// Builds the spec for a source's layer of the given geometry type.
    ///
    /// New layers start visible.
    pub fn new(source_id: &str, tag: GeometryTag) -> Self {
        let category = tag.category();
        Self {
            id: format!("{}-{}", source_id, tag.name()),
            source: source_id.to_string(),
            category,
            paint: category.paint(),
            filter: category.filter(),
            visibility: Visibility::Visible,
        }
    }

    /// Serializes to the engine's layer style form.
    pub fn to_style_json(&self) -> Value {
        json!({
            "id": self.id,
            "type": self.category.label(),
            "source": self.source,
            "paint": self.paint.to_style_json(),
            "filter": self.filter.to_expression(),
            "layout": { "visibility": self.visibility.label() },
        })
    }
}

/// Distinct geometry tags in first-seen order.
fn distinct_tags(collection: &FeatureCollection) -> Vec<GeometryTag> {
    let mut tags: Vec<GeometryTag> = Vec::new();
    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        let Some(tag) = GeometryTag::of(geometry) else {
            continue;
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Builds one layer spec per distinct geometry type in the collection.
///
/// Features with no geometry or an unclassifiable one contribute nothing.
/// An empty collection yields no specs.
pub fn collect_layer_specs(source_id: &str, collection: &FeatureCollection) -> Vec<LayerSpec> {
    distinct_tags(collection)
        .into_iter()
        .map(|tag| LayerSpec::new(source_id, tag))
        .collect()
}

/// Tracks created layer ids in creation order for the visibility panel.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    created: Vec<String>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, id: String) {
        self.created.push(id);
    }

    pub fn ids(&self) -> &[String] {
        &self.created
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty()
    }
}

/// Registers one layer per distinct geometry type of a registered source.
///
/// Not atomic: registration stops at the first failure and already-created
/// layers stay registered and tracked. Returns the created ids in order.
pub fn materialize(
    engine: &mut MapEngine,
    registry: &mut LayerRegistry,
    source_id: &str,
) -> Result<Vec<String>, MapError> {
    let source = engine
        .source(source_id)
        .ok_or_else(|| MapError::UnknownSource(source_id.to_string()))?;
    let specs = collect_layer_specs(source_id, source.data());

    let mut created = Vec::with_capacity(specs.len());
    for spec in specs {
        let id = spec.id.clone();
        engine.add_layer(spec)?;
        registry.track(id.clone());
        created.push(id);
    }
    Ok(created)
}
