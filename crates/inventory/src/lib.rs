//! Inventory domain module.
//!
//! Items, their borrowing history and the rules that keep that history
//! consistent. Pure, deterministic logic: no IO, no printing, no clock reads
//! (callers pass "today" explicitly).

pub mod borrow_record;
pub mod conflict;
pub mod filter;
pub mod item;
pub mod item_list;

pub use borrow_record::{BorrowRecord, BorrowStatus};
pub use conflict::{ActivePeriod, ConflictDetector};
pub use filter::{RecordFilter, Timing};
pub use item::Item;
pub use item_list::ItemList;
