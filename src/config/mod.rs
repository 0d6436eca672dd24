//! Cascading configuration.
//!
//! Configuration lives in three tiers of YAML documents under a config root:
//! 1. **System** - `system.yml`, shared by everything
//! 2. **Runner** - `runners/<runner>.yml`
//! 3. **Game** - `games/<slug>.yml`
//!
//! ## Merge Strategy
//! - Later tiers override earlier ones key by key
//! - Mappings merge one level deep; deeper values are replaced
//! - The game tier never replaces a non-mapping value from a lower tier
//!
//! A [`ConfigStore`] is opened for one tier. Ordinary keys are read from and
//! written to that tier's document; `system`, `runner` and `game` read the
//! merged sections.

pub mod codec;
mod layer;
mod merge;
mod paths;
mod store;

pub use codec::{Document, parse_document, read_document, render_document, write_document};
pub use layer::{ConfigLayer, LayerKind, is_document_name};
pub use merge::{cascade, merge_layer};
pub use paths::AppPaths;
pub use store::{ConfigStore, GAMES_DIR, RUNNERS_DIR, SYSTEM_DOCUMENT};
