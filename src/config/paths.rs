//! Directory layout for configuration, data and cache.
//!
//! ## Environment Variables
//! - `PLAYCFG_CONFIG_DIR` - Config root (default: `$XDG_CONFIG_HOME/playcfg`)
//! - `PLAYCFG_DATA_DIR` - Data root (default: `$XDG_DATA_HOME/playcfg`)
//! - `PLAYCFG_CACHE_DIR` - Cache root (default: `$XDG_CACHE_HOME/playcfg`)

use super::store::{GAMES_DIR, RUNNERS_DIR};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "playcfg";
const LIBRARY_DB: &str = "library.db";

/// Root directories used by the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Holds `system.yml`, `runners/` and `games/`
    pub config_dir: PathBuf,
    /// Installed runners, runtime, artwork and the library database
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    /// Launcher icons for desktop integration
    pub icon_dir: PathBuf,
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl AppPaths {
    /// Discover paths from environment and platform defaults.
    pub fn discover() -> Self {
        let from_env = |var: &str| std::env::var(var).ok().map(PathBuf::from);
        let base = |dir: Option<PathBuf>| {
            dir.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
        };

        let config_dir = from_env("PLAYCFG_CONFIG_DIR").unwrap_or_else(|| base(dirs::config_dir()));
        let data_dir = from_env("PLAYCFG_DATA_DIR").unwrap_or_else(|| base(dirs::data_dir()));
        let cache_dir = from_env("PLAYCFG_CACHE_DIR").unwrap_or_else(|| base(dirs::cache_dir()));
        let icon_dir = data_dir
            .parent()
            .unwrap_or(Path::new("."))
            .join("icons/hicolor/32x32/apps");

        Self {
            config_dir,
            data_dir,
            cache_dir,
            icon_dir,
        }
    }

    /// Self-contained layout under one root directory.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_dir: root.join("config"),
            data_dir: root.join("data"),
            cache_dir: root.join("cache"),
            icon_dir: root.join("icons"),
        }
    }

    /// Apply explicit overrides, e.g. from the command line.
    pub fn with_overrides(
        mut self,
        config_dir: Option<PathBuf>,
        data_dir: Option<PathBuf>,
        cache_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = config_dir {
            self.config_dir = dir;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if let Some(dir) = cache_dir {
            self.cache_dir = dir;
        }
        self
    }

    pub fn runners_config_dir(&self) -> PathBuf {
        self.config_dir.join(RUNNERS_DIR)
    }

    pub fn games_config_dir(&self) -> PathBuf {
        self.config_dir.join(GAMES_DIR)
    }

    /// Where runner binaries are unpacked.
    pub fn runner_dir(&self) -> PathBuf {
        self.data_dir.join("runners")
    }

    pub fn runtime_dir(&self) -> PathBuf {
        self.data_dir.join("runtime")
    }

    pub fn covers_dir(&self) -> PathBuf {
        self.data_dir.join("covers")
    }

    pub fn banners_dir(&self) -> PathBuf {
        self.data_dir.join("banners")
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.data_dir.join("lib")
    }

    /// Downloads kept between installs.
    pub fn installer_cache_dir(&self) -> PathBuf {
        self.cache_dir.join("installer")
    }

    pub fn tmp_cache_dir(&self) -> PathBuf {
        self.cache_dir.join("tmp")
    }

    pub fn library_db(&self) -> PathBuf {
        self.data_dir.join(LIBRARY_DB)
    }

    /// Every directory that must exist before the launcher runs.
    pub fn bootstrap_dirs(&self) -> Vec<PathBuf> {
        vec![
            self.config_dir.clone(),
            self.runners_config_dir(),
            self.games_config_dir(),
            self.data_dir.clone(),
            self.covers_dir(),
            self.icon_dir.clone(),
            self.banners_dir(),
            self.runner_dir(),
            self.lib_dir(),
            self.runtime_dir(),
            self.cache_dir.clone(),
            self.installer_cache_dir(),
            self.tmp_cache_dir(),
        ]
    }
}
