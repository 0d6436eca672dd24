//! Stella, the Atari 2600 emulator.

use super::{LaunchCommand, LaunchError, OptionKind, Runner, RunnerOption};
use crate::config::ConfigStore;
use serde_yaml::Value;
use std::path::PathBuf;

const GAME_OPTIONS: &[RunnerOption] = &[RunnerOption {
    option: "main_file",
    kind: OptionKind::File,
    label: "ROM file",
    help: Some(
        "The game data, commonly called a ROM image.\n\
         Supported formats: A26/BIN/ROM. GZIP and ZIP compressed ROMs are supported.",
    ),
}];

#[derive(Debug, Clone)]
pub struct Stella {
    runner_dir: PathBuf,
}

impl Stella {
    pub fn new(runner_dir: impl Into<PathBuf>) -> Self {
        Self {
            runner_dir: runner_dir.into(),
        }
    }
}

impl Runner for Stella {
    fn name(&self) -> &'static str {
        "stella"
    }

    fn human_name(&self) -> &'static str {
        "Stella"
    }

    fn platform(&self) -> &'static str {
        "Atari 2600"
    }

    fn game_options(&self) -> &'static [RunnerOption] {
        GAME_OPTIONS
    }

    fn tarball(&self, arch: &str) -> Option<&'static str> {
        match arch {
            "x64" | "x86_64" => Some("stella-4.0-x86_64.tar.gz"),
            _ => None,
        }
    }

    fn executable(&self) -> PathBuf {
        self.runner_dir.join("stella/bin/stella")
    }

    fn play(&self, config: &ConfigStore) -> Result<LaunchCommand, LaunchError> {
        let cart = config
            .get("game")
            .and_then(|game| game.get("main_file"))
            .and_then(Value::as_str)
            .unwrap_or_default();
        let cart = PathBuf::from(cart);
        if cart.as_os_str().is_empty() || !cart.exists() {
            return Err(LaunchError::FileNotFound { path: cart });
        }

        Ok(LaunchCommand {
            command: vec![
                self.executable().to_string_lossy().into_owned(),
                cart.to_string_lossy().into_owned(),
            ],
        })
    }
}
