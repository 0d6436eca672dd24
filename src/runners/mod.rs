//! Runners: the programs that actually launch games.
//!
//! A runner reads a game's effective configuration and turns it into a
//! command line.

mod stella;

pub use stella::Stella;

use crate::config::{AppPaths, ConfigStore};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of value an option expects, used by editors to pick a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    File,
    Directory,
    String,
    Bool,
}

/// A configurable option exposed by a runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunnerOption {
    /// Key inside the `game` or runner section
    pub option: &'static str,
    #[serde(rename = "type")]
    pub kind: OptionKind,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

/// Command line ready to be spawned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchCommand {
    pub command: Vec<String>,
}

/// Why a game could not be launched.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LaunchError {
    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Game has no runner configured")]
    MissingRunner,

    #[error("Unknown runner: {0}")]
    UnknownRunner(String),
}

pub trait Runner {
    /// Identifier used in config documents (`runner: <name>`).
    fn name(&self) -> &'static str;

    fn human_name(&self) -> &'static str;

    fn platform(&self) -> &'static str;

    fn game_options(&self) -> &'static [RunnerOption];

    fn runner_options(&self) -> &'static [RunnerOption] {
        &[]
    }

    /// Archive to download for an architecture, if the runner is packaged.
    fn tarball(&self, arch: &str) -> Option<&'static str>;

    fn executable(&self) -> PathBuf;

    fn is_installed(&self) -> bool {
        self.executable().exists()
    }

    /// Build the launch command from a game store.
    fn play(&self, config: &ConfigStore) -> Result<LaunchCommand, LaunchError>;
}

/// Names of every built-in runner.
pub const RUNNERS: &[&str] = &["stella"];

/// Look up a runner by name.
pub fn runner_for(name: &str, paths: &AppPaths) -> Result<Box<dyn Runner>, LaunchError> {
    match name {
        "stella" => Ok(Box::new(Stella::new(paths.runner_dir()))),
        other => Err(LaunchError::UnknownRunner(other.to_string())),
    }
}

/// Resolve the runner pinned by a game store.
pub fn runner_for_game(
    config: &ConfigStore,
    paths: &AppPaths,
) -> Result<Box<dyn Runner>, LaunchError> {
    let name = config.runner().ok_or(LaunchError::MissingRunner)?;
    runner_for(name, paths)
}
