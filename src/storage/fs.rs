//! Filesystem response store
//!
//! Layout: `<root>/<type>/<id>/<document>.json`, or `<root>/<type>/<document>.json`
//! when the resource id is absent.

use crate::storage::{DocumentAddress, ResponseStore, StorageError, StorageResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Response store writing pretty-printed JSON documents under a root directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store rooted at `root`
    ///
    /// The directory itself is created lazily on the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory addressed by `(resource_type, resource_id)`
    pub fn directory(&self, address: &DocumentAddress) -> StorageResult<PathBuf> {
        let mut dir = self.root.join(checked_component(address.resource_type.as_str())?);
        if let Some(id) = &address.resource_id {
            dir.push(checked_component(id.as_str())?);
        }
        Ok(dir)
    }

    /// Full file path of the document at `address`
    pub fn location(&self, address: &DocumentAddress) -> StorageResult<PathBuf> {
        let file_name = format!("{}.json", checked_component(&address.document)?);
        Ok(self.directory(address)?.join(file_name))
    }
}

impl ResponseStore for FsStore {
    fn save(&self, address: &DocumentAddress, payload: &Value) -> StorageResult<()> {
        let dir = self.directory(address)?;
        let path = self.location(address)?;

        // create_dir_all tolerates directories created concurrently by another writer
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            path: dir.clone(),
            source,
        })?;

        let body = serde_json::to_vec_pretty(payload)?;
        fs::write(&path, body).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        let shown = path.strip_prefix(&self.root).unwrap_or(&path);
        tracing::info!("Saved {}", shown.display());
        Ok(())
    }
}

/// Rejects components that would escape or alias the store root
fn checked_component(component: &str) -> StorageResult<&str> {
    if component.is_empty()
        || component == "."
        || component == ".."
        || component.contains(['/', '\\', '\0'])
    {
        return Err(StorageError::InvalidAddress(format!(
            "unusable path component {:?}",
            component
        )));
    }
    Ok(component)
}
