use std::sync::Arc;

use thiserror::Error;

use invmgr_core::DomainError;
use invmgr_inventory::ItemList;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The file could not be parsed. `line` is 1-based.
    #[error("corrupt data on line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    /// Stored data violates a domain rule (e.g. overlapping borrow records).
    #[error("stored data rejected: {0}")]
    Domain(#[from] DomainError),
}

impl StorageError {
    pub fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            line,
            reason: reason.into(),
        }
    }
}

/// Whole-list persistence: the session loads once at startup and saves after
/// each change.
pub trait ItemStore: Send + Sync {
    fn load(&self) -> Result<ItemList, StorageError>;
    fn save(&self, items: &ItemList) -> Result<(), StorageError>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn load(&self) -> Result<ItemList, StorageError> {
        (**self).load()
    }

    fn save(&self, items: &ItemList) -> Result<(), StorageError> {
        (**self).save(items)
    }
}
