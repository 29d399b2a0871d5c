use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use arbitrack::adapter::outbound::sqlite::SqliteStore;

/// Migrated SQLite database in a temporary directory.
///
/// The directory and database file are removed on drop.
pub struct TempDb {
    dir: TempDir,
    store: Arc<SqliteStore>,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("arbitrack.db");
        let store = SqliteStore::open(path.to_str().expect("utf-8 temp path"))
            .expect("open sqlite store");
        Self {
            dir,
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> Arc<SqliteStore> {
        Arc::clone(&self.store)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("arbitrack.db")
    }

    pub fn dir(&self) -> &std::path::Path {
        self.dir.path()
    }
}
