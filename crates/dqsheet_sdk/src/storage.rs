//! Object storage used by the directory driver.
//!
//! Objects are addressed by `/`-separated names. A prefix names a logical folder: listing
//! `dq_excel` returns every object below `dq_excel/`, at any depth.

use dqsheet_core::join_object_path;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised by an object store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No object with that name
    #[error("Object not found: {0}")]
    NotFound(String),

    /// A prefix that names an object rather than a folder
    #[error("Not a folder: {0}")]
    NotADirectory(String),

    /// Underlying I/O failure
    #[error("Storage I/O error on {object}: {source}")]
    Io {
        object: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(object: impl Into<String>, source: io::Error) -> Self {
        let object = object.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound(object)
        } else {
            Self::Io { object, source }
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Where workbooks are read from and compiled documents are written to.
pub trait ObjectStore: Send + Sync {
    /// Names of all objects under `prefix`, sorted.
    ///
    /// A missing folder lists as empty. A prefix naming an object fails with
    /// `StorageError::NotADirectory`.
    fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Full content of an object.
    fn read_bytes(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Creates or replaces an object.
    fn write_string(&self, name: &str, content: &str) -> StorageResult<()>;
}

/// Objects stored as files below a root directory.
///
/// Object names are paths relative to the root; absolute names are used as is.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Creates a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ObjectStore for LocalStore {
    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let dir = self.path_of(prefix);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        if !dir.is_dir() {
            return Err(StorageError::NotADirectory(prefix.to_string()));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).follow_links(true) {
            let entry = entry.map_err(|e| StorageError::io(prefix, io::Error::from(e)))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(&dir) else {
                continue;
            };
            let relative: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            names.push(join_object_path(prefix, &relative.join("/")));
        }

        names.sort();
        Ok(names)
    }

    fn read_bytes(&self, name: &str) -> StorageResult<Vec<u8>> {
        fs::read(self.path_of(name)).map_err(|e| StorageError::io(name, e))
    }

    fn write_string(&self, name: &str, content: &str) -> StorageResult<()> {
        let path = self.path_of(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(name, e))?;
        }
        fs::write(&path, content).map_err(|e| StorageError::io(name, e))
    }
}

/// Objects held in memory.
///
/// # Example
///
/// ```rust
/// use dqsheet_sdk::{MemoryStore, ObjectStore};
///
/// let store = MemoryStore::new().with_object("in/a.xlsx", b"...".to_vec());
/// store.write_string("out/a.yaml", "rules: []\n").unwrap();
///
/// assert_eq!(store.list("in").unwrap(), vec!["in/a.xlsx"]);
/// assert_eq!(store.read_string("out/a.yaml").as_deref(), Some("rules: []\n"));
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object.
    pub fn with_object(self, name: impl Into<String>, content: Vec<u8>) -> Self {
        self.insert(name, content);
        self
    }

    /// Adds or replaces an object.
    pub fn insert(&self, name: impl Into<String>, content: Vec<u8>) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), content);
    }

    /// Content of an object as UTF-8 text.
    pub fn read_string(&self, name: &str) -> Option<String> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let folder = join_object_path(prefix, "");
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        let names: Vec<String> = objects
            .keys()
            .filter(|name| name.starts_with(&folder))
            .cloned()
            .collect();

        if names.is_empty() && objects.contains_key(prefix) {
            return Err(StorageError::NotADirectory(prefix.to_string()));
        }
        Ok(names)
    }

    fn read_bytes(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn write_string(&self, name: &str, content: &str) -> StorageResult<()> {
        self.insert(name, content.as_bytes().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_lists_folder_only() {
        let store = MemoryStore::new()
            .with_object("dq/b.xlsx", vec![1])
            .with_object("dq/nested/a.xlsx", vec![2])
            .with_object("dq_other/c.xlsx", vec![3]);

        assert_eq!(
            store.list("dq").unwrap(),
            vec!["dq/b.xlsx", "dq/nested/a.xlsx"]
        );
        assert_eq!(store.list("dq/").unwrap().len(), 2);
        assert_eq!(store.list("").unwrap().len(), 3);
        assert!(store.list("missing").unwrap().is_empty());
    }

    #[test]
    fn test_memory_store_read_missing() {
        let err = MemoryStore::new().read_bytes("nope").unwrap_err();
        assert!(matches!(err, StorageError::NotFound(name) if name == "nope"));
    }

    #[test]
    fn test_local_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());

        store.write_string("out/nested/doc.yaml", "rules: []\n").unwrap();
        store.write_string("out/a.yaml", "x\n").unwrap();

        assert_eq!(
            store.list("out").unwrap(),
            vec!["out/a.yaml", "out/nested/doc.yaml"]
        );
        assert_eq!(
            store.read_bytes("out/nested/doc.yaml").unwrap(),
            b"rules: []\n".to_vec()
        );
    }

    #[test]
    fn test_local_store_missing_folder_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());

        assert!(store.list("does/not/exist").unwrap().is_empty());
        assert!(matches!(
            store.read_bytes("missing.xlsx").unwrap_err(),
            StorageError::NotFound(_)
        ));
    }

    #[test]
    fn test_list_of_an_object_is_not_a_folder() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rules.xlsx"), b"x").unwrap();
        let store = LocalStore::new(dir.path());

        let err = store.list("rules.xlsx").unwrap_err();
        assert!(matches!(&err, StorageError::NotADirectory(name) if name == "rules.xlsx"));

        let store = MemoryStore::new().with_object("in/rules.xlsx", vec![1]);
        assert!(matches!(
            store.list("in/rules.xlsx").unwrap_err(),
            StorageError::NotADirectory(_)
        ));
        assert_eq!(store.list("in").unwrap(), vec!["in/rules.xlsx"]);
    }

    #[test]
    fn test_local_store_absolute_prefix() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rules.xlsx"), b"x").unwrap();

        let store = LocalStore::new(".");
        let prefix = dir.path().to_string_lossy().into_owned();
        let names = store.list(&prefix).unwrap();

        assert_eq!(names, vec![format!("{prefix}/rules.xlsx")]);
        assert_eq!(store.read_bytes(&names[0]).unwrap(), b"x".to_vec());
    }
}
