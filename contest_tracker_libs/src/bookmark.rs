use serde_json::{Map, Value};
use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Storage key holding the JSON array of bookmarked contest ids.
pub const BOOKMARK_STORAGE_KEY: &str = "bookmarkedContests";

type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access local storage file")]
    IoError(#[from] std::io::Error),
    #[error("failed to (de)serialize local storage content")]
    SerializeError(#[from] serde_json::Error),
    #[error("local storage file {0} is not a JSON object")]
    InvalidFormat(String),
}

/// String-keyed persistent storage local to one client.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps every item in a single JSON object file, rewritten through a sibling temporary file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // the file is replaced as a whole so that a failed write leaves the previous content
    fn temporary_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn read_items(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(items) => Ok(items),
            _ => Err(StorageError::InvalidFormat(self.path.display().to_string())),
        }
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_items()?
            .get(key)
            .and_then(|value| value.as_str())
            .map(String::from))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_items()?;
        items.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let temporary = self.temporary_path();
        let file = File::create(&temporary)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &items)?;
        writer.flush()?;
        fs::rename(&temporary, &self.path)?;

        Ok(())
    }
}

/// Bookmarked contest ids, persisted to [`LocalStorage`] after every change.
#[derive(Debug)]
pub struct BookmarkStore<S: LocalStorage> {
    storage: S,
    ids: Vec<String>,
}

impl<S: LocalStorage> BookmarkStore<S> {
    /// Reads the bookmarks saved in `storage`. Missing or unreadable content yields an
    /// empty set.
    pub fn load(storage: S) -> Self {
        let ids = match storage.get_item(BOOKMARK_STORAGE_KEY) {
            Ok(Some(saved)) => match serde_json::from_str::<Vec<String>>(&saved) {
                Ok(ids) => ids,
                Err(e) => {
                    tracing::warn!("discard malformed bookmarks {:?}: {}", saved, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read bookmarks: {:?}", e);
                Vec::new()
            }
        };

        Self { storage, ids }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_bookmarked(&self, id: &str) -> bool {
        self.ids.iter().any(|bookmarked| bookmarked == id)
    }

    /// Flips the membership of `id` and persists the result before returning.
    ///
    /// When persisting fails the in-memory set is left untouched. Returns whether `id` is
    /// bookmarked afterwards.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let bookmarked = !self.is_bookmarked(id);
        let ids: Vec<String> = if bookmarked {
            self.ids
                .iter()
                .cloned()
                .chain(std::iter::once(id.to_string()))
                .collect()
        } else {
            self.ids.iter().filter(|b| *b != id).cloned().collect()
        };

        self.storage
            .set_item(BOOKMARK_STORAGE_KEY, &serde_json::to_string(&ids)?)?;
        self.ids = ids;

        Ok(bookmarked)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
