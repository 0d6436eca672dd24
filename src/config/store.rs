//! Cascading configuration store.
//!
//! A store is opened for one layer (system, a runner, or a game). It loads
//! all three documents that apply to that layer and keeps the effective
//! configuration in sync with them. Reads and writes of ordinary keys go to
//! the active layer's own document; `save` persists only that document.

use super::codec::{Document, read_document, write_document};
use super::layer::{ConfigLayer, LayerKind, is_document_name};
use super::merge::cascade;
use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::fmt;
use std::ops::Index;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the system document inside the config root.
pub const SYSTEM_DOCUMENT: &str = "system.yml";
/// Directory holding runner documents inside the config root.
pub const RUNNERS_DIR: &str = "runners";
/// Directory holding game documents inside the config root.
pub const GAMES_DIR: &str = "games";

static NULL: Value = Value::Null;

/// Three layered documents and their merged view.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_dir: PathBuf,
    layer: ConfigLayer,
    /// Runner whose document is loaded. For a game store this comes from the
    /// game document's `runner` key at load time.
    runner: Option<String>,
    system_config: Document,
    runner_config: Document,
    game_config: Document,
    config: Document,
}

impl ConfigStore {
    /// Open the store for a runner name and/or game slug under `config_dir`.
    ///
    /// Never fails: unreadable documents are logged and treated as empty.
    pub fn load(config_dir: impl Into<PathBuf>, runner: Option<&str>, game: Option<&str>) -> Self {
        let layer = ConfigLayer::from_identity(runner, game);
        let runner = match &layer {
            ConfigLayer::Runner { name } => Some(name.clone()),
            _ => None,
        };

        let mut store = Self {
            config_dir: config_dir.into(),
            layer,
            runner,
            system_config: Document::new(),
            runner_config: Document::new(),
            game_config: Document::new(),
            config: Document::new(),
        };

        store.game_config = read_document(store.game_config_path().as_deref());
        if store.layer.kind() == LayerKind::Game {
            store.runner = store
                .game_config
                .get("runner")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
        }
        store.runner_config = read_document(store.runner_config_path().as_deref());
        store.system_config = read_document(Some(&store.system_config_path()));
        store.update_global_config();

        debug!(layer = %store.layer, runner = ?store.runner, "Loaded config store");
        store
    }

    /// Open the system layer.
    pub fn system(config_dir: impl Into<PathBuf>) -> Self {
        Self::load(config_dir, None, None)
    }

    /// Open a runner layer.
    pub fn for_runner(config_dir: impl Into<PathBuf>, name: &str) -> Self {
        Self::load(config_dir, Some(name), None)
    }

    /// Open a game layer.
    pub fn for_game(config_dir: impl Into<PathBuf>, slug: &str) -> Self {
        Self::load(config_dir, None, Some(slug))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn layer(&self) -> &ConfigLayer {
        &self.layer
    }

    /// Runner whose document backs the runner layer, if any.
    pub fn runner(&self) -> Option<&str> {
        self.runner.as_deref()
    }

    /// Game slug, for game stores.
    pub fn game(&self) -> Option<&str> {
        match &self.layer {
            ConfigLayer::Game { slug } => Some(slug),
            _ => None,
        }
    }

    pub fn system_config_path(&self) -> PathBuf {
        self.config_dir.join(SYSTEM_DOCUMENT)
    }

    pub fn runner_config_path(&self) -> Option<PathBuf> {
        self.runner
            .as_deref()
            .filter(|name| is_document_name(name))
            .map(|name| self.config_dir.join(RUNNERS_DIR).join(format!("{}.yml", name)))
    }

    pub fn game_config_path(&self) -> Option<PathBuf> {
        self.game().and_then(|slug| self.game_path_for(slug))
    }

    /// `None` when the slug would not name a file directly inside `games/`.
    fn game_path_for(&self, slug: &str) -> Option<PathBuf> {
        is_document_name(slug).then(|| self.config_dir.join(GAMES_DIR).join(format!("{}.yml", slug)))
    }

    /// Path of the document that `save` writes.
    pub fn active_path(&self) -> Option<PathBuf> {
        match self.layer.kind() {
            LayerKind::System => Some(self.system_config_path()),
            LayerKind::Runner => self.runner_config_path(),
            LayerKind::Game => self.game_config_path(),
        }
    }

    /// The effective (merged) configuration.
    pub fn config(&self) -> &Document {
        &self.config
    }

    pub fn system_config(&self) -> &Document {
        &self.system_config
    }

    pub fn runner_config(&self) -> &Document {
        &self.runner_config
    }

    pub fn game_config(&self) -> &Document {
        &self.game_config
    }

    /// The active layer's own document.
    pub fn active_document(&self) -> &Document {
        match self.layer.kind() {
            LayerKind::System => &self.system_config,
            LayerKind::Runner => &self.runner_config,
            LayerKind::Game => &self.game_config,
        }
    }

    fn active_document_mut(&mut self) -> &mut Document {
        match self.layer.kind() {
            LayerKind::System => &mut self.system_config,
            LayerKind::Runner => &mut self.runner_config,
            LayerKind::Game => &mut self.game_config,
        }
    }

    /// Look up a key.
    ///
    /// `system`, `runner` and `game` return that section of the effective
    /// configuration. Any other key is read from the active layer's own
    /// document only.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if LayerKind::is_reserved(key) {
            return self.config.get(key);
        }
        self.active_document().get(key)
    }

    /// Look up a key, falling back to `default`.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Write a key into the active layer's document and refresh the merged view.
    ///
    /// On the system layer the whole system document is replaced by `value`
    /// and `key` is ignored.
    pub fn set(&mut self, key: &str, value: Value) -> ConfigResult<()> {
        match self.layer.kind() {
            LayerKind::System => {
                self.system_config = match value {
                    Value::Mapping(map) => map,
                    Value::Null => Document::new(),
                    _ => {
                        return Err(ConfigError::NotAMapping {
                            layer: self.layer.to_string(),
                        });
                    }
                };
            }
            LayerKind::Runner | LayerKind::Game => {
                self.active_document_mut()
                    .insert(Value::String(key.to_string()), value);
            }
        }
        self.update_global_config();
        Ok(())
    }

    /// Write the active layer's document to disk.
    pub fn save(&mut self) -> ConfigResult<()> {
        let path = self
            .active_path()
            .ok_or_else(|| ConfigError::missing_path(&self.layer))?;
        write_document(Some(&path), self.active_document())?;
        info!(layer = %self.layer, path = %path.display(), "Saved config document");
        self.update_global_config();
        Ok(())
    }

    /// Delete a game document from disk.
    ///
    /// Defaults to this store's own game. A missing file is not an error.
    pub fn remove(&self, game: Option<&str>) -> ConfigResult<()> {
        let slug = game
            .or(self.game())
            .ok_or_else(|| ConfigError::missing_path(LayerKind::Game))?;
        let path = self
            .game_path_for(slug)
            .ok_or_else(|| ConfigError::missing_path(LayerKind::Game))?;
        debug!(game = %slug, "Removing config");

        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| ConfigError::io(&path, e))?;
        } else {
            debug!(path = %path.display(), "No config file to remove");
        }
        Ok(())
    }

    /// Directory where games should be installed.
    ///
    /// Uses `system.game_path` from the effective configuration, otherwise
    /// `default` when it exists on disk.
    pub fn get_path(&self, default: Option<&Path>) -> Option<PathBuf> {
        let configured = self
            .config
            .get(LayerKind::System.as_str())
            .and_then(|system| system.get("game_path"))
            .and_then(Value::as_str);
        if let Some(path) = configured {
            return Some(PathBuf::from(path));
        }

        default.filter(|p| p.exists()).map(Path::to_path_buf)
    }

    fn update_global_config(&mut self) {
        self.config = cascade(&self.system_config, &self.runner_config, &self.game_config);
    }
}

impl Index<&str> for ConfigStore {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_yaml::to_string(&self.config) {
            Ok(yaml) => f.write_str(&yaml),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::codec::parse_document;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, yaml: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, yaml).unwrap();
    }

    fn doc(yaml: &str) -> Document {
        parse_document(yaml).unwrap()
    }

    #[test]
    fn test_empty_root_gives_empty_config() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::system(temp.path());
        assert!(store.config().is_empty());
        assert_eq!(store.layer(), &ConfigLayer::System);
        assert!(store.runner_config_path().is_none());
        assert!(store.game_config_path().is_none());
    }

    #[test]
    fn test_game_document_pins_runner() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "games/pitfall.yml", "runner: foo\n");

        let store = ConfigStore::load(temp.path(), Some("bar"), Some("pitfall"));
        assert_eq!(store.runner(), Some("foo"));
        assert_eq!(
            store.runner_config_path(),
            Some(temp.path().join("runners/foo.yml"))
        );
    }

    #[test]
    fn test_game_without_runner_key_has_no_runner_layer() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "games/pitfall.yml", "game: {main_file: x}\n");
        write(temp.path(), "runners/bar.yml", "bar: {fullscreen: true}\n");

        let store = ConfigStore::load(temp.path(), Some("bar"), Some("pitfall"));
        assert_eq!(store.runner(), None);
        assert!(store.runner_config().is_empty());
    }

    #[test]
    fn test_runner_store_merges_system() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "a: {x: 1}\n");
        write(temp.path(), "runners/stella.yml", "a: {y: 2}\n");

        let store = ConfigStore::for_runner(temp.path(), "stella");
        assert_eq!(store.config(), &doc("a: {x: 1, y: 2}"));
    }

    #[test]
    fn test_malformed_document_is_empty() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "a: {x: 1}\n");
        write(temp.path(), "runners/stella.yml", "a: [broken\n");

        let store = ConfigStore::for_runner(temp.path(), "stella");
        assert!(store.runner_config().is_empty());
        assert_eq!(store.config(), &doc("a: {x: 1}"));
    }

    #[test]
    fn test_get_reads_active_layer_only() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "resolution: 800x600\n");
        write(temp.path(), "runners/stella.yml", "fullscreen: true\n");

        let store = ConfigStore::for_runner(temp.path(), "stella");
        assert_eq!(store.get("fullscreen"), Some(&Value::Bool(true)));
        // Present in the merged view but not in the runner document
        assert!(store.config().contains_key("resolution"));
        assert_eq!(store.get("resolution"), None);
        assert_eq!(
            store.get_or("resolution", Value::from("1024x768")),
            Value::from("1024x768")
        );
        assert_eq!(store["resolution"], Value::Null);
    }

    #[test]
    fn test_get_reserved_key_reads_merged_section() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "system: {game_path: /games}\n");
        write(temp.path(), "games/pitfall.yml", "runner: stella\nsystem: {fps: 60}\n");

        let store = ConfigStore::for_game(temp.path(), "pitfall");
        assert_eq!(store["system"], Value::Mapping(doc("{game_path: /games, fps: 60}")));
        assert_eq!(store.get("game"), None);
    }

    #[test]
    fn test_set_on_runner_updates_merged_view() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "stella: {fullscreen: false}\n");

        let mut store = ConfigStore::for_runner(temp.path(), "stella");
        store
            .set("stella", Value::Mapping(doc("fullscreen: true")))
            .unwrap();
        assert_eq!(store.config(), &doc("stella: {fullscreen: true}"));
        assert!(store.system_config().contains_key("stella"));
        assert_eq!(store.system_config(), &doc("stella: {fullscreen: false}"));
    }

    #[test]
    fn test_set_on_system_replaces_document() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "old: 1\nsystem: {game_path: /games}\n");

        let mut store = ConfigStore::system(temp.path());
        store
            .set("ignored", Value::Mapping(doc("system: {game_path: /new}")))
            .unwrap();
        assert_eq!(store.system_config(), &doc("system: {game_path: /new}"));
        assert!(!store.config().contains_key("old"));
        assert!(!store.config().contains_key("ignored"));
    }

    #[test]
    fn test_set_on_system_rejects_scalar() {
        let temp = TempDir::new().unwrap();
        let mut store = ConfigStore::system(temp.path());
        let err = store.set("x", Value::from(3)).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn test_save_round_trip() {
        let temp = TempDir::new().unwrap();
        let mut store = ConfigStore::for_game(temp.path(), "pitfall");
        store.set("runner", Value::from("stella")).unwrap();
        store
            .set("game", Value::Mapping(doc("main_file: /roms/pitfall.a26")))
            .unwrap();
        store.save().unwrap();

        let reloaded = ConfigStore::for_game(temp.path(), "pitfall");
        assert_eq!(reloaded.game_config(), store.game_config());
        assert_eq!(reloaded.runner(), Some("stella"));
        // Nothing else was written
        assert!(!temp.path().join(SYSTEM_DOCUMENT).exists());
    }

    #[test]
    fn test_save_only_writes_active_layer() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "a: 1\n");
        let mut store = ConfigStore::for_runner(temp.path(), "stella");
        store.set("b", Value::from(2)).unwrap();
        store.save().unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("system.yml")).unwrap(),
            "a: 1\n"
        );
        assert!(temp.path().join("runners/stella.yml").exists());
    }

    #[test]
    fn test_remove_missing_game_is_noop() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::for_game(temp.path(), "ghost");
        store.remove(None).unwrap();
        store.remove(Some("other")).unwrap();
    }

    #[test]
    fn test_remove_deletes_named_game() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "games/pitfall.yml", "runner: stella\n");
        write(temp.path(), "games/adventure.yml", "runner: stella\n");

        let store = ConfigStore::for_game(temp.path(), "pitfall");
        store.remove(Some("adventure")).unwrap();
        assert!(!temp.path().join("games/adventure.yml").exists());
        assert!(temp.path().join("games/pitfall.yml").exists());

        store.remove(None).unwrap();
        assert!(!temp.path().join("games/pitfall.yml").exists());
    }

    #[test]
    fn test_remove_rejects_slug_outside_games_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "a: 1\n");
        write(temp.path(), "runners/stella.yml", "b: 2\n");

        let store = ConfigStore::for_game(temp.path(), "pitfall");
        for slug in ["../system", "../runners/stella", "a/b", "a\\b", ".."] {
            let err = store.remove(Some(slug)).unwrap_err();
            assert!(matches!(err, ConfigError::MissingPath { .. }), "{}", slug);
        }
        assert!(temp.path().join("system.yml").exists());
        assert!(temp.path().join("runners/stella.yml").exists());
    }

    #[test]
    fn test_escaping_identities_have_no_path() {
        let temp = TempDir::new().unwrap();
        let mut game = ConfigStore::for_game(temp.path(), "../../outside");
        assert_eq!(game.game_config_path(), None);
        game.set("runner", Value::from("stella")).unwrap();
        assert!(matches!(game.save().unwrap_err(), ConfigError::MissingPath { .. }));

        let runner = ConfigStore::for_runner(temp.path(), "../system");
        assert_eq!(runner.runner_config_path(), None);
    }

    #[test]
    fn test_pinned_runner_cannot_escape_runners_dir() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "a: 1\n");
        write(temp.path(), "games/pitfall.yml", "runner: ../system\n");

        let store = ConfigStore::for_game(temp.path(), "pitfall");
        assert_eq!(store.runner_config_path(), None);
        assert!(store.runner_config().is_empty());
    }

    #[test]
    fn test_remove_without_game_fails() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::system(temp.path());
        let err = store.remove(None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPath { .. }));
    }

    #[test]
    fn test_get_path_prefers_configured_game_path() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "system: {game_path: /srv/games}\n");
        let store = ConfigStore::system(temp.path());
        assert_eq!(
            store.get_path(Some(temp.path())),
            Some(PathBuf::from("/srv/games"))
        );
    }

    #[test]
    fn test_get_path_falls_back_to_existing_default() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::system(temp.path());
        assert_eq!(
            store.get_path(Some(temp.path())),
            Some(temp.path().to_path_buf())
        );
        assert_eq!(store.get_path(Some(&temp.path().join("missing"))), None);
        assert_eq!(store.get_path(None), None);
    }

    #[test]
    fn test_display_renders_merged_yaml() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "system.yml", "system: {game_path: /games}\n");
        let store = ConfigStore::system(temp.path());
        assert_eq!(store.to_string(), "system:\n  game_path: /games\n");
    }
}
