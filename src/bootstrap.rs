//! First-run checks: directory tree and library database.

use crate::config::AppPaths;
use crate::db::Database;
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Make sure every launcher directory exists and the library schema is current.
///
/// With `force_wipe` the library database is deleted first and rebuilt empty.
pub fn check_config(paths: &AppPaths, force_wipe: bool) -> Result<Database> {
    for directory in paths.bootstrap_dirs() {
        if !directory.exists() {
            debug!(path = %directory.display(), "Creating directory");
            std::fs::create_dir_all(&directory)
                .with_context(|| format!("Failed to create {}", directory.display()))?;
        }
    }

    let db_path = paths.library_db();
    if force_wipe && db_path.exists() {
        debug!(path = %db_path.display(), "Wiping library database");
        std::fs::remove_file(&db_path)
            .with_context(|| format!("Failed to remove {}", db_path.display()))?;
        for suffix in ["-wal", "-shm"] {
            let mut sidecar = db_path.clone().into_os_string();
            sidecar.push(suffix);
            match std::fs::remove_file(&sidecar) {
                Ok(()) => debug!(path = ?sidecar, "Removed database sidecar"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = ?sidecar, error = %e, "Could not remove database sidecar"),
            }
        }
    }

    Database::open(&db_path)
        .with_context(|| format!("Failed to open library database {}", db_path.display()))
}
