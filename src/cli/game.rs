//! `game` subcommands: add, list and remove library entries.
//!
//! A library entry pairs a database row with the game's config document.

use crate::config::{AppPaths, ConfigStore, Document};
use crate::db::Database;
use crate::format::{OutputFormat, format_games};
use crate::types::Game;
use anyhow::{Result, anyhow};
use clap::Subcommand;
use serde_yaml::Value;
use tracing::{info, warn};

#[derive(Subcommand, Debug)]
pub enum GameCommand {
    /// Add a game to the library and write its config document
    Add {
        /// Display name (the slug is derived from it)
        name: String,

        /// Runner that launches the game
        #[arg(long)]
        runner: String,

        /// Main game file, stored as game.main_file
        #[arg(long, value_name = "FILE")]
        main_file: Option<String>,

        /// Install directory
        #[arg(long, value_name = "DIR")]
        directory: Option<String>,
    },

    /// List games in the library
    List,

    /// Remove a game from the library and delete its config document
    Remove {
        /// Game slug
        slug: String,
    },
}

/// Add a game: database row first, then its config document. The row is
/// deleted again when the document cannot be written.
pub fn run_add(
    paths: &AppPaths,
    db: &Database,
    name: &str,
    runner: &str,
    main_file: Option<&str>,
    directory: Option<&str>,
) -> Result<Game> {
    let game = db.add_game(name, Some(runner), directory)?;

    if let Err(e) = write_game_config(paths, &game.slug, name, runner, main_file) {
        // Don't leave a library row without a config document
        if let Err(rollback) = db.delete_game(&game.slug) {
            warn!(game = %game.slug, error = %rollback, "Could not roll back library entry");
        }
        return Err(e);
    }

    info!(game = %game.slug, runner = %runner, "Added game");
    Ok(game)
}

fn write_game_config(
    paths: &AppPaths,
    slug: &str,
    name: &str,
    runner: &str,
    main_file: Option<&str>,
) -> Result<()> {
    let mut store = ConfigStore::for_game(&paths.config_dir, slug);
    store.set("name", Value::from(name))?;
    store.set("runner", Value::from(runner))?;
    if let Some(file) = main_file {
        let mut section = Document::new();
        section.insert(Value::from("main_file"), Value::from(file));
        store.set("game", Value::Mapping(section))?;
    }
    store.save()?;
    Ok(())
}

pub fn run_list(db: &Database, format: OutputFormat) -> Result<String> {
    format_games(&db.list_games()?, format)
}

/// Remove a game from the library and delete its config document.
pub fn run_remove(paths: &AppPaths, db: &Database, slug: &str) -> Result<()> {
    let removed = db.delete_game(slug)?;
    let store = ConfigStore::for_game(&paths.config_dir, slug);
    let had_config = store.game_config_path().is_some_and(|p| p.exists());
    store.remove(None)?;

    if !removed && !had_config {
        return Err(anyhow!("Game {} not found", slug));
    }
    info!(game = %slug, "Removed game");
    Ok(())
}
