//! CLI command definitions for playcfg
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod config;
pub mod game;
pub mod play;

use crate::config::AppPaths;
use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use config::{GetArgs, PathArgs, SetArgs};
use game::GameCommand;
use play::PlayArgs;
use std::path::PathBuf;

/// Cascading system/runner/game configuration for a game launcher
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config root holding system.yml, runners/ and games/
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Data directory (runners, library database)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Cache directory
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format: yaml (default), json, markdown
    #[arg(short, long, default_value = "yaml", global = true)]
    pub format: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolve directories from the environment, then apply CLI overrides.
    pub fn paths(&self) -> AppPaths {
        AppPaths::discover().with_overrides(
            self.config_dir.clone(),
            self.data_dir.clone(),
            self.cache_dir.clone(),
        )
    }

    pub fn output_format(&self) -> anyhow::Result<OutputFormat> {
        OutputFormat::from_str(&self.format)
            .ok_or_else(|| anyhow::anyhow!("Unknown output format '{}'", self.format))
    }
}

/// Selects which layer a command operates on.
///
/// With neither flag the system layer is used.
#[derive(Args, Debug, Clone, Default)]
pub struct LayerArgs {
    /// Operate on a runner's config
    #[arg(long, conflicts_with = "game")]
    pub runner: Option<String>,

    /// Operate on a game's config (by slug)
    #[arg(long)]
    pub game: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create missing directories and sync the library database
    Check {
        /// Delete the library database before syncing
        #[arg(long)]
        force_wipe: bool,
    },

    /// Print the merged configuration for a layer
    Show(LayerArgs),

    /// Read a key from a layer's own document
    Get(GetArgs),

    /// Write a key into a layer's document and save it
    Set(SetArgs),

    /// Print the directory where games are installed
    GamePath(PathArgs),

    /// Manage the game library
    #[command(subcommand)]
    Game(GameCommand),

    /// Launch a game through its runner
    Play(PlayArgs),
}
