//! Configuration layer identity.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The layer a store reads from, writes to and saves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigLayer {
    /// Global settings shared by every runner and game.
    System,
    /// Settings for one runner (emulator or engine).
    Runner { name: String },
    /// Settings for one installed game, identified by its slug.
    Game { slug: String },
}

impl ConfigLayer {
    /// Pick the layer for a runner name and/or game slug.
    ///
    /// A game slug takes precedence over a runner name. Empty strings count as
    /// absent.
    pub fn from_identity(runner: Option<&str>, game: Option<&str>) -> Self {
        let non_empty = |s: Option<&str>| s.filter(|s| !s.is_empty()).map(str::to_string);

        if let Some(slug) = non_empty(game) {
            ConfigLayer::Game { slug }
        } else if let Some(name) = non_empty(runner) {
            ConfigLayer::Runner { name }
        } else {
            ConfigLayer::System
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            ConfigLayer::System => LayerKind::System,
            ConfigLayer::Runner { .. } => LayerKind::Runner,
            ConfigLayer::Game { .. } => LayerKind::Game,
        }
    }
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigLayer::System => write!(f, "system"),
            ConfigLayer::Runner { name } => write!(f, "runner:{}", name),
            ConfigLayer::Game { slug } => write!(f, "game:{}", slug),
        }
    }
}

/// Whether a runner name or game slug can be used as a document file stem.
///
/// Rejects empty names, path separators and `.`/`..`, so the document always
/// lands directly inside `runners/` or `games/`.
pub fn is_document_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Layer discriminant, in merge order (lowest precedence first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    System = 0,
    Runner = 1,
    Game = 2,
}

impl LayerKind {
    /// Top-level key under which this layer's section lives in a document.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::System => "system",
            LayerKind::Runner => "runner",
            LayerKind::Game => "game",
        }
    }

    /// Whether `key` names one of the three layer sections.
    pub fn is_reserved(key: &str) -> bool {
        key.parse::<LayerKind>().is_ok_and(|kind| kind.as_str() == key)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(LayerKind::System),
            "runner" => Ok(LayerKind::Runner),
            "game" => Ok(LayerKind::Game),
            _ => Err(ConfigError::InvalidLayer(s.to_string())),
        }
    }
}
