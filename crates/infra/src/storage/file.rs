use std::fs;
use std::path::{Path, PathBuf};

use invmgr_inventory::ItemList;

use super::codec;
use super::r#trait::{ItemStore, StorageError};

/// Flat text file store.
///
/// A missing file loads as an empty list. Saves write a sibling temp file
/// and rename it over the target so a crash never leaves half a file.
#[derive(Debug, Clone)]
pub struct FileItemStore {
    path: PathBuf,
}

impl FileItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ItemStore for FileItemStore {
    fn load(&self) -> Result<ItemList, StorageError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "data file not found; starting empty");
            return Ok(ItemList::default());
        }

        let text = fs::read_to_string(&self.path)?;
        let items = codec::decode(&text)?;
        tracing::debug!(path = %self.path.display(), items = items.size(), "loaded item list");
        Ok(items)
    }

    fn save(&self, items: &ItemList) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, codec::encode(items))?;
        fs::rename(&temp, &self.path)?;

        tracing::debug!(path = %self.path.display(), items = items.size(), "saved item list");
        Ok(())
    }
}
