//! Item list persistence boundary.
//!
//! The domain only knows `Item::save_string()`; this module owns the rest of
//! the on-disk layout (lost flags and borrow history) and re-attaches records
//! through the item's own validation on load.

pub mod codec;
pub mod file;
pub mod in_memory;
pub mod r#trait;

pub use file::FileItemStore;
pub use in_memory::InMemoryItemStore;
pub use r#trait::{ItemStore, StorageError};
