//! `play` subcommand.

use crate::config::{AppPaths, ConfigStore};
use crate::db::Database;
use crate::runners::{LaunchCommand, runner_for_game};
use anyhow::{Context, Result, anyhow};
use clap::Args;
use tracing::{info, warn};

/// Arguments for the play subcommand
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Game slug
    pub slug: String,

    /// Spawn the runner instead of printing its command line
    #[arg(long)]
    pub exec: bool,
}

/// Resolve the launch command for a game from its effective configuration.
pub fn launch_command(paths: &AppPaths, slug: &str) -> Result<LaunchCommand> {
    let store = ConfigStore::for_game(&paths.config_dir, slug);
    let runner = runner_for_game(&store, paths)?;
    if !runner.is_installed() {
        warn!(runner = runner.name(), "Runner executable not found");
    }
    Ok(runner.play(&store)?)
}

/// Spawn the game and wait for it to exit, recording the launch in the library.
pub fn run_exec(launch: &LaunchCommand, db: Option<&Database>, slug: &str) -> Result<()> {
    let (program, args) = launch
        .command
        .split_first()
        .ok_or_else(|| anyhow!("Empty launch command"))?;

    info!(game = %slug, program = %program, "Launching");
    let status = std::process::Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("Failed to start {}", program))?;

    // Only launches that actually started count as played
    if let Some(db) = db
        && let Err(e) = db.mark_played(slug)
    {
        warn!(game = %slug, error = %e, "Could not record launch");
    }
    if !status.success() {
        return Err(anyhow!("{} exited with {}", program, status));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runners::LaunchError;
    use tempfile::TempDir;

    #[test]
    fn test_launch_command_uses_pinned_runner() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::with_root(temp.path());
        let rom = temp.path().join("combat.a26");
        std::fs::write(&rom, b"\0").unwrap();
        std::fs::create_dir_all(paths.games_config_dir()).unwrap();
        std::fs::write(
            paths.games_config_dir().join("combat.yml"),
            format!("runner: stella\ngame:\n  main_file: {}\n", rom.display()),
        )
        .unwrap();

        let launch = launch_command(&paths, "combat").unwrap();
        assert_eq!(launch.command.len(), 2);
        assert!(launch.command[0].ends_with("stella/bin/stella"));
    }

    #[test]
    fn test_launch_unknown_game() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::with_root(temp.path());
        let err = launch_command(&paths, "nothing").unwrap_err();
        assert_eq!(
            err.downcast_ref::<LaunchError>(),
            Some(&LaunchError::MissingRunner)
        );
    }

    #[test]
    fn test_exec_rejects_empty_command() {
        let launch = LaunchCommand { command: vec![] };
        assert!(run_exec(&launch, None, "x").is_err());
    }

    #[test]
    fn test_failed_spawn_is_not_recorded() {
        let db = Database::open_in_memory().unwrap();
        db.add_game("Combat", Some("stella"), None).unwrap();
        let launch = LaunchCommand {
            command: vec!["/nonexistent/playcfg-runner".into(), "combat.a26".into()],
        };

        assert!(run_exec(&launch, Some(&db), "combat").is_err());
        let game = db.get_game("combat").unwrap().unwrap();
        assert!(game.last_played.is_none());
    }
}
