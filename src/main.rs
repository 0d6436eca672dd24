//! playcfg
//!
//! Inspect and edit layered game launcher configuration from the command line.

use anyhow::Result;
use clap::Parser;
use playcfg::bootstrap::check_config;
use playcfg::cli::{Cli, Command, config, game, game::GameCommand, play};
use playcfg::config::AppPaths;
use playcfg::format::format_launch;
use playcfg::logging::{self, LogTarget};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let paths = cli.paths();
    let format = cli.output_format()?;
    debug!(config_dir = %paths.config_dir.display(), "Using config root");

    match &cli.command {
        Command::Check { force_wipe } => {
            let db = check_config(&paths, *force_wipe)?;
            let games = db.list_games()?;
            println!(
                "Config root {} ready ({} games in library)",
                paths.config_dir.display(),
                games.len()
            );
        }
        Command::Show(layer) => {
            print!("{}", config::run_show(&paths, layer, format)?);
        }
        Command::Get(args) => {
            print!("{}", ensure_newline(config::run_get(&paths, args, format)?));
        }
        Command::Set(args) => {
            let saved = config::run_set(&paths, args)?;
            println!("Saved {}", saved.display());
        }
        Command::GamePath(args) => match config::run_game_path(&paths, args) {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!("No game path configured");
                std::process::exit(1);
            }
        },
        Command::Game(command) => run_game(&paths, command, format)?,
        Command::Play(args) => {
            let launch = play::launch_command(&paths, &args.slug)?;
            if args.exec {
                let db = open_library(&paths);
                play::run_exec(&launch, db.as_ref(), &args.slug)?;
            } else {
                print!("{}", ensure_newline(format_launch(&launch, format)?));
            }
        }
    }

    Ok(())
}

fn run_game(
    paths: &AppPaths,
    command: &GameCommand,
    format: playcfg::format::OutputFormat,
) -> Result<()> {
    let db = check_config(paths, false)?;
    match command {
        GameCommand::Add {
            name,
            runner,
            main_file,
            directory,
        } => {
            let added = game::run_add(
                paths,
                &db,
                name,
                runner,
                main_file.as_deref(),
                directory.as_deref(),
            )?;
            println!("Added {} ({})", added.name, added.slug);
        }
        GameCommand::List => {
            print!("{}", ensure_newline(game::run_list(&db, format)?));
        }
        GameCommand::Remove { slug } => {
            game::run_remove(paths, &db, slug)?;
            println!("Removed {}", slug);
        }
    }
    Ok(())
}

/// Open the library if it exists; launching works without one.
fn open_library(paths: &AppPaths) -> Option<playcfg::db::Database> {
    let db_path = paths.library_db();
    if !db_path.exists() {
        return None;
    }
    match playcfg::db::Database::open(&db_path) {
        Ok(db) => Some(db),
        Err(e) => {
            tracing::warn!(error = %e, "Could not open library database");
            None
        }
    }
}

fn ensure_newline(mut s: String) -> String {
    if !s.ends_with('\n') {
        s.push('\n');
    }
    s
}
