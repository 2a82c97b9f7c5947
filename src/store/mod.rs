pub mod document;
pub mod storage;

pub use document::{Database, DOCUMENT_VERSION};
pub use storage::{get_data_path, load_database, save_database};

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::LeagueResult;

/// Handle to the league document store.
///
/// Cheap to clone; every clone shares the same document. Reads see the last
/// committed document. Writes are serialized: a mutation runs against a staged
/// copy, the copy is persisted, and only then does it become visible. A failed
/// mutation or a failed save leaves the committed document untouched.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Database>>,
    path: Option<PathBuf>,
}

impl Store {
    /// Store that lives only in memory
    pub fn in_memory() -> Self {
        Self::from_database(Database::new(), None)
    }

    /// Open a file-backed store, loading the existing document if there is one
    pub async fn open(path: PathBuf) -> anyhow::Result<Self> {
        let load_path = path.clone();
        let database = tokio::task::spawn_blocking(move || load_database(&load_path))
            .await
            .context("League data load task failed")??;

        debug!(
            "Loaded {} leagues from {}",
            database.leagues.len(),
            path.display()
        );

        Ok(Self::from_database(database, Some(path)))
    }

    fn from_database(database: Database, path: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(database)),
            path,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn read<R>(&self, f: impl FnOnce(&Database) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    pub async fn write<R>(
        &self,
        f: impl FnOnce(&mut Database) -> LeagueResult<R>,
    ) -> LeagueResult<R> {
        let mut guard = Arc::clone(&self.inner).write_owned().await;
        let mut staged = (*guard).clone();
        let output = f(&mut staged)?;

        match &self.path {
            // Save and publish together; a dropped caller must not leave disk ahead of memory
            Some(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
                    save_database(&path, &staged)?;
                    *guard = staged;
                    Ok(())
                })
                .await
                .context("League data save task failed")??;
            }
            None => *guard = staged,
        }

        Ok(output)
    }
}
