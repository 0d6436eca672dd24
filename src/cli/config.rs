//! `show`, `get`, `set` and `game-path` subcommands.

use super::LayerArgs;
use crate::config::{AppPaths, ConfigStore, LayerKind, parse_document};
use crate::format::{OutputFormat, format_document, format_value};
use anyhow::{Context, Result};
use clap::Args;
use serde_yaml::Value;
use std::path::PathBuf;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    #[command(flatten)]
    pub layer: LayerArgs,

    /// Key to read (`system`, `runner` and `game` read the merged section)
    pub key: String,

    /// YAML value printed when the key is absent
    #[arg(long, value_name = "YAML")]
    pub default: Option<String>,
}

/// Arguments for the set subcommand
#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub layer: LayerArgs,

    /// Key to write (ignored for the system layer, whose whole document is replaced)
    pub key: String,

    /// New value, parsed as YAML
    pub value: String,
}

/// Arguments for the game-path subcommand
#[derive(Args, Debug)]
pub struct PathArgs {
    #[command(flatten)]
    pub layer: LayerArgs,

    /// Fallback directory used when it exists and no game_path is configured
    #[arg(long, value_name = "DIR")]
    pub default: Option<PathBuf>,
}

fn open_store(paths: &AppPaths, layer: &LayerArgs) -> ConfigStore {
    ConfigStore::load(
        &paths.config_dir,
        layer.runner.as_deref(),
        layer.game.as_deref(),
    )
}

fn parse_value(text: &str) -> Result<Value> {
    serde_yaml::from_str(text).with_context(|| format!("Invalid YAML value: {}", text))
}

/// Render the merged configuration of a layer.
pub fn run_show(paths: &AppPaths, layer: &LayerArgs, format: OutputFormat) -> Result<String> {
    let store = open_store(paths, layer);
    format_document(store.config(), format)
}

/// Read one key.
pub fn run_get(paths: &AppPaths, args: &GetArgs, format: OutputFormat) -> Result<String> {
    let store = open_store(paths, &args.layer);
    let default = match &args.default {
        Some(text) => parse_value(text)?,
        None => Value::Null,
    };
    format_value(&store.get_or(&args.key, default), format)
}

/// Write one key and save the layer's document.
pub fn run_set(paths: &AppPaths, args: &SetArgs) -> Result<PathBuf> {
    let mut store = open_store(paths, &args.layer);
    let value = if store.layer().kind() == LayerKind::System {
        // The system layer takes a whole document
        Value::Mapping(parse_document(&args.value)?)
    } else {
        parse_value(&args.value)?
    };

    store.set(&args.key, value)?;
    store.save()?;
    store
        .active_path()
        .context("Saved layer has no document path")
}

/// Resolve the game install directory.
pub fn run_game_path(paths: &AppPaths, args: &PathArgs) -> Option<PathBuf> {
    let store = open_store(paths, &args.layer);
    store.get_path(args.default.as_deref())
}
