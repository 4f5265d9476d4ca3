//! Infrastructure layer: persistence of the item list to flat text files.

pub mod storage;

pub use storage::{FileItemStore, InMemoryItemStore, ItemStore, StorageError};
