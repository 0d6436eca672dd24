//! Game library CRUD operations.

use super::{Database, now_ms};
use crate::types::Game;
use anyhow::{Result, anyhow};
use heck::ToKebabCase;
use rusqlite::{OptionalExtension, Row, params};

const GAME_COLUMNS: &str = "id, name, slug, runner, directory, installed, last_played";

/// Turn a display name into a slug: lowercase words joined by dashes.
pub fn slugify(name: &str) -> String {
    name.to_kebab_case()
}

fn game_from_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        runner: row.get(3)?,
        directory: row.get(4)?,
        installed: row.get(5)?,
        last_played: row.get(6)?,
    })
}

impl Database {
    /// Register a game. The slug is derived from `name` and must be unique.
    pub fn add_game(
        &self,
        name: &str,
        runner: Option<&str>,
        directory: Option<&str>,
    ) -> Result<Game> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(anyhow!("Game name '{}' does not produce a usable slug", name));
        }

        self.with_conn(|conn| {
            let exists: bool = conn
                .query_row("SELECT 1 FROM games WHERE slug = ?1", params![&slug], |_| Ok(true))
                .optional()?
                .unwrap_or(false);

            if exists {
                return Err(anyhow!("Game '{}' already in library", slug));
            }

            let installed = directory.is_some();
            conn.execute(
                "INSERT INTO games (name, slug, runner, directory, installed)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, &slug, runner, directory, installed],
            )?;

            Ok(Game {
                id: conn.last_insert_rowid(),
                name: name.to_string(),
                slug,
                runner: runner.map(str::to_string),
                directory: directory.map(str::to_string),
                installed,
                last_played: None,
            })
        })
    }

    /// Get a game by slug.
    pub fn get_game(&self, slug: &str) -> Result<Option<Game>> {
        self.with_conn(|conn| {
            let game = conn
                .query_row(
                    &format!("SELECT {} FROM games WHERE slug = ?1", GAME_COLUMNS),
                    params![slug],
                    game_from_row,
                )
                .optional()?;
            Ok(game)
        })
    }

    /// List all games ordered by name.
    pub fn list_games(&self) -> Result<Vec<Game>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM games ORDER BY name COLLATE NOCASE",
                GAME_COLUMNS
            ))?;
            let games = stmt
                .query_map([], game_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(games)
        })
    }

    /// Delete a game. Returns whether a row was removed.
    pub fn delete_game(&self, slug: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM games WHERE slug = ?1", params![slug])?;
            Ok(deleted > 0)
        })
    }

    /// Record a launch of the game.
    pub fn mark_played(&self, slug: &str) -> Result<()> {
        let now = now_ms();
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE games SET last_played = ?1 WHERE slug = ?2",
                params![now, slug],
            )?;
            if updated == 0 {
                return Err(anyhow!("Game {} not found", slug));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Pitfall!"), "pitfall");
        assert_eq!(slugify("River Raid II"), "river-raid-ii");
        assert_eq!(slugify("  Space   Invaders "), "space-invaders");
    }

    #[test]
    fn test_add_and_get_game() {
        let db = Database::open_in_memory().unwrap();
        let game = db
            .add_game("River Raid", Some("stella"), Some("/games/river-raid"))
            .unwrap();
        assert_eq!(game.slug, "river-raid");
        assert!(game.installed);

        let fetched = db.get_game("river-raid").unwrap().unwrap();
        assert_eq!(fetched, game);
        assert!(db.get_game("missing").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.add_game("Adventure", Some("stella"), None).unwrap();
        let err = db.add_game("adventure", None, None).unwrap_err();
        assert!(err.to_string().contains("already in library"));
    }

    #[test]
    fn test_empty_slug_rejected() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.add_game("!!!", None, None).is_err());
    }

    #[test]
    fn test_list_is_sorted_by_name() {
        let db = Database::open_in_memory().unwrap();
        db.add_game("Pitfall", Some("stella"), None).unwrap();
        db.add_game("adventure", Some("stella"), None).unwrap();
        db.add_game("Combat", None, None).unwrap();

        let names: Vec<String> = db.list_games().unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["adventure", "Combat", "Pitfall"]);
    }

    #[test]
    fn test_delete_and_mark_played() {
        let db = Database::open_in_memory().unwrap();
        db.add_game("Pitfall", Some("stella"), None).unwrap();

        db.mark_played("pitfall").unwrap();
        assert!(db.get_game("pitfall").unwrap().unwrap().last_played.is_some());

        assert!(db.delete_game("pitfall").unwrap());
        assert!(!db.delete_game("pitfall").unwrap());
        assert!(db.mark_played("pitfall").is_err());
    }
}
