//! Seed data loader.
//!
//! Applies every `.sql` file in a directory against the pool in lexical
//! filename order. Unreadable entries are logged and skipped; a statement
//! failure aborts the run so broken seed state surfaces immediately.

use std::fs;
use std::path::{Path, PathBuf};

use sqlx::PgPool;

use crate::StoreError;

/// Keep only `.sql` files and sort them so apply order is deterministic.
fn sorted_sql_paths(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.retain(|path| path.extension().is_some_and(|ext| ext == "sql"));
    paths.sort();
    paths
}

/// Apply every `.sql` file under `dir`, in lexical filename order.
///
/// Returns the number of files applied. Seed files are expected to be
/// idempotent (`ON CONFLICT DO NOTHING`), so re-running is safe.
///
/// # Errors
///
/// Returns [`StoreError::SeedDir`] if `dir` cannot be listed, or
/// [`StoreError::Sqlx`] if executing a seed file fails.
pub async fn apply_seed_dir(pool: &PgPool, dir: &Path) -> Result<usize, StoreError> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::SeedDir {
        path: dir.display().to_string(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => paths.push(entry.path()),
            Err(error) => {
                tracing::warn!(error = %error, "skipping unreadable directory entry");
            }
        }
    }

    let mut applied = 0usize;
    for path in sorted_sql_paths(paths) {
        let sql = match fs::read_to_string(&path) {
            Ok(sql) => sql,
            Err(error) => {
                tracing::warn!(path = %path.display(), error = %error, "skipping unreadable seed file");
                continue;
            }
        };

        sqlx::raw_sql(&sql).execute(pool).await?;
        tracing::info!(path = %path.display(), "applied seed file");
        applied += 1;
    }

    Ok(applied)
}
