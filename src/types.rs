//! Core types shared by the library database and the CLI.

use serde::{Deserialize, Serialize};

/// A game registered in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub name: String,
    /// Stable identifier; also names the game's config document.
    pub slug: String,
    pub runner: Option<String>,
    /// Install directory
    pub directory: Option<String>,
    pub installed: bool,
    /// Last launch as a unix timestamp in milliseconds.
    pub last_played: Option<i64>,
}
