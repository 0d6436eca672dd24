//! Cascade merge for layered configuration documents.
//!
//! Layers are folded into the effective document in fixed order: system,
//! runner, game. Merging is shallow: when a key exists on both sides and both
//! values are mappings, the layer's entries are copied over the existing ones
//! one level deep. Anything below that level is replaced, not merged.
//!
//! The game layer is more conservative than the other two. It never replaces
//! an existing non-mapping value: such keys are dropped from the game layer.

use super::codec::Document;
use super::layer::LayerKind;
use serde_yaml::Value;

/// Fold one layer's document into the effective document.
pub fn merge_layer(effective: &mut Document, source: &Document, kind: LayerKind) {
    for (key, value) in source {
        let Some(existing) = effective.get_mut(key) else {
            effective.insert(key.clone(), value.clone());
            continue;
        };

        match (existing, value) {
            // Both mappings: shallow update
            (Value::Mapping(existing_map), Value::Mapping(source_map)) => {
                for (k, v) in source_map {
                    existing_map.insert(k.clone(), v.clone());
                }
            }
            // Game layer never overwrites a non-mapping value
            (existing, _) if kind == LayerKind::Game && !existing.is_mapping() => {}
            (existing, value) => *existing = value.clone(),
        }
    }
}

/// Build the effective document from the three layers.
pub fn cascade(system: &Document, runner: &Document, game: &Document) -> Document {
    let mut effective = Document::new();
    merge_layer(&mut effective, system, LayerKind::System);
    merge_layer(&mut effective, runner, LayerKind::Runner);
    merge_layer(&mut effective, game, LayerKind::Game);
    effective
}
