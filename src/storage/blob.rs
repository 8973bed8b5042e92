use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Local};

use super::StorageError;

#[derive(Debug, Clone, PartialEq)]
pub struct BlobMetadata {
    pub size: u64,
    pub last_modified: DateTime<Local>,
}

/// Flat key/value blob storage. Keys are slash-separated relative paths
/// such as `transcripts/<uuid>_<filename>`.
pub trait BlobStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError>;
    fn metadata(&self, key: &str) -> Result<Option<BlobMetadata>, StorageError>;
}

/// Blob store backed by a directory tree. Each key maps to the file at
/// the same relative path under the root.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Map a key to its path under the root. Keys must be plain relative
    /// paths; anything with `..`, a leading `/`, or `.` segments is rejected.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(key);
        let plain = !key.is_empty()
            && path
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(path))
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, bytes)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = match self.resolve(key) {
            Ok(path) => path,
            Err(_) => {
                tracing::warn!(key, "Rejected blob key outside store root");
                return Ok(None);
            }
        };
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        collect_keys(&self.root, "", &mut keys)?;
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }

    fn metadata(&self, key: &str) -> Result<Option<BlobMetadata>, StorageError> {
        let path = match self.resolve(key) {
            Ok(path) => path,
            Err(_) => {
                tracing::warn!(key, "Rejected blob key outside store root");
                return Ok(None);
            }
        };
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                let modified = meta.modified()?;
                Ok(Some(BlobMetadata {
                    size: meta.len(),
                    last_modified: DateTime::<Local>::from(modified),
                }))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn collect_keys(dir: &Path, rel: &str, out: &mut Vec<String>) -> Result<(), StorageError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        // A store that has never been written to has no root directory yet.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let key = if rel.is_empty() {
            name
        } else {
            format!("{rel}/{name}")
        };
        if entry.file_type()?.is_dir() {
            collect_keys(&entry.path(), &key, out)?;
        } else {
            out.push(key);
        }
    }
    Ok(())
}
