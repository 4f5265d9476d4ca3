use std::sync::RwLock;

use invmgr_inventory::ItemList;

use super::codec;
use super::r#trait::{ItemStore, StorageError};

/// In-memory store for tests/dev.
///
/// Keeps the encoded text rather than the list itself so loads go through
/// the same decoding (and validation) as the file store.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    contents: RwLock<String>,
    saves: RwLock<usize>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: RwLock::new(text.into()),
            saves: RwLock::new(0),
        }
    }

    /// Current encoded contents.
    pub fn contents(&self) -> String {
        self.contents
            .read()
            .map(|text| text.clone())
            .unwrap_or_default()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.read().map(|n| *n).unwrap_or_default()
    }
}

impl ItemStore for InMemoryItemStore {
    fn load(&self) -> Result<ItemList, StorageError> {
        let text = self
            .contents
            .read()
            .map_err(|_| StorageError::Io(std::io::Error::other("lock poisoned")))?;
        codec::decode(&text)
    }

    fn save(&self, items: &ItemList) -> Result<(), StorageError> {
        let mut text = self
            .contents
            .write()
            .map_err(|_| StorageError::Io(std::io::Error::other("lock poisoned")))?;
        *text = codec::encode(items);

        if let Ok(mut saves) = self.saves.write() {
            *saves += 1;
        }
        Ok(())
    }
}
