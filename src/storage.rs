//! Local persistence for recent searches and the last searched city
//!
//! Two independent files in one directory: a JSON array of city names and a
//! plain-text last city. Writes are not grouped; each succeeds or fails alone,
//! and writes to one file are applied in request order.

use std::collections::HashMap;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;

use crate::history::SearchHistory;

pub const HISTORY_FILE: &str = "recent_searches.json";
pub const LAST_CITY_FILE: &str = "last_city";

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history file is corrupted: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct LocalStore {
    dir: PathBuf,
    /// Ticket handed to each write at request time
    next_write: Arc<AtomicU64>,
    /// Newest ticket applied per file; held across the blocking write
    applied: Arc<Mutex<HashMap<PathBuf, u64>>>,
}

#[derive(Debug)]
enum FileOp {
    Write(Vec<u8>),
    Remove,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_write: Arc::new(AtomicU64::new(0)),
            applied: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// `{data_local_dir}/skyfetch`, or the working directory when the platform has none.
    pub fn default_dir() -> PathBuf {
        dirs_next::data_local_dir()
            .map(|dir| dir.join("skyfetch"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn history_path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    pub fn last_city_path(&self) -> PathBuf {
        self.dir.join(LAST_CITY_FILE)
    }

    /// Missing file means no history yet.
    pub async fn load_history(&self) -> Result<SearchHistory, StorageError> {
        let Some(json) = read_optional(&self.history_path()).await? else {
            return Ok(SearchHistory::new());
        };
        let entries: Vec<String> = serde_json::from_str(&json)?;
        Ok(SearchHistory::from_entries(entries))
    }

    /// Writes to the same file take effect in the order they were requested,
    /// whatever order the returned futures finish in.
    pub fn save_history(
        &self,
        cities: &[String],
    ) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        let op = serde_json::to_vec(cities)
            .map(FileOp::Write)
            .map_err(StorageError::from);
        self.schedule(self.history_path(), op)
    }

    /// Ordered with [`LocalStore::save_history`]; a missing file is fine.
    pub fn clear_history(&self) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        self.schedule(self.history_path(), Ok(FileOp::Remove))
    }

    pub async fn load_last_city(&self) -> Result<Option<String>, StorageError> {
        let city = read_optional(&self.last_city_path()).await?;
        Ok(city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()))
    }

    pub fn save_last_city(
        &self,
        city: &str,
    ) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        let op = Ok(FileOp::Write(city.as_bytes().to_vec()));
        self.schedule(self.last_city_path(), op)
    }

    /// Take a ticket now; apply later unless a newer ticket already landed.
    ///
    /// The lock travels into the blocking write, so aborting the awaiting
    /// task can't let an older write finish after a newer one.
    fn schedule(
        &self,
        path: PathBuf,
        op: Result<FileOp, StorageError>,
    ) -> impl Future<Output = Result<(), StorageError>> + Send + 'static {
        let ticket = self.next_write.fetch_add(1, Ordering::SeqCst) + 1;
        let dir = self.dir.clone();
        let applied = Arc::clone(&self.applied);

        async move {
            let op = op?;
            let mut latest = applied.lock_owned().await;
            if latest.get(&path).is_some_and(|&newest| newest > ticket) {
                tracing::debug!(path = %path.display(), ticket, "skipping superseded write");
                return Ok(());
            }
            latest.insert(path.clone(), ticket);

            let target = path.clone();
            tokio::task::spawn_blocking(move || {
                let _latest = latest;
                apply(&dir, &target, op)
            })
            .await
            .map_err(|e| StorageError::Io {
                path,
                source: std::io::Error::other(e),
            })?
        }
    }
}

fn apply(dir: &Path, path: &Path, op: FileOp) -> Result<(), StorageError> {
    match op {
        FileOp::Write(contents) => {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            std::fs::write(path, contents).map_err(|source| StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        FileOp::Remove => match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}

async fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
