use chrono::NaiveDate;

use invmgr_core::{DomainError, DomainResult};

use crate::borrow_record::BorrowRecord;
use crate::conflict::ConflictDetector;
use crate::filter::RecordFilter;

const DETAIL_DESCRIPTION_LIMIT: usize = 15;
const DETAIL_DESCRIPTION_KEEP: usize = 14;
const ELLIPSIS: &str = "...";
const NAME_FORBIDDEN: char = '|';

/// Aggregate root: one inventory entry and its borrowing history.
///
/// Records are only added through [`Item::add_borrow_record`], so the
/// pairwise non-conflict invariant holds for the lifetime of the item.
/// `Clone` duplicates the record history element by element.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    quantity: i64,
    description: String,
    lost: bool,
    borrow_records: Vec<BorrowRecord>,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        quantity: i64,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let description = description.into();
        validate_name(&name)?;
        validate_quantity(quantity)?;
        validate_description(&description)?;

        Ok(Self {
            name,
            quantity,
            description,
            lost: false,
            borrow_records: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Read-only view of the history, in insertion order.
    pub fn borrow_records(&self) -> &[BorrowRecord] {
        &self.borrow_records
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> DomainResult<()> {
        let description = description.into();
        validate_description(&description)?;
        self.description = description;
        Ok(())
    }

    pub fn set_lost(&mut self, lost: bool) {
        self.lost = lost;
    }

    pub fn mark_as_lost(&mut self) {
        self.set_lost(true);
    }

    /// Exact, case-sensitive match on the item name.
    pub fn contains(&self, search_term: &str) -> bool {
        self.name == search_term
    }

    /// Attach a record unless it overlaps one already held.
    ///
    /// On conflict the history is left untouched.
    pub fn add_borrow_record(&mut self, record: BorrowRecord) -> DomainResult<&mut Self> {
        if let Some(existing) = ConflictDetector::first_conflict(&record, &self.borrow_records) {
            return Err(DomainError::conflict(format!(
                "dates conflict with an existing borrowing by {} starting {}",
                existing.borrower(),
                existing.borrow_date()
            )));
        }
        self.borrow_records.push(record);
        Ok(self)
    }

    /// Records matching `filter`, in stored order. Each call starts afresh.
    pub fn filter_records<'a>(
        &'a self,
        filter: &'a RecordFilter,
    ) -> impl Iterator<Item = &'a BorrowRecord> + 'a {
        self.borrow_records
            .iter()
            .filter(move |record| filter.matches(record))
    }

    /// Mark the borrower's earliest open loan that has started by `date` as returned.
    ///
    /// A late return stretches the loan up to `date`. If that stretch reaches
    /// into another booking the return is refused and the item is unchanged.
    pub fn return_record(&mut self, borrower: &str, date: NaiveDate) -> DomainResult<&BorrowRecord> {
        let position = self
            .borrow_records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.borrower() == borrower && !r.is_returned() && r.borrow_date() <= date)
            .min_by_key(|(_, r)| r.borrow_date())
            .map(|(i, _)| i)
            .ok_or_else(|| {
                DomainError::not_found(format!("{borrower} has no ongoing borrowing of {}", self.name))
            })?;

        let mut returned = self.borrow_records[position].clone();
        returned.mark_returned(date)?;

        let clash = self
            .borrow_records
            .iter()
            .enumerate()
            .find(|(i, other)| *i != position && ConflictDetector::conflicts(&returned, other));
        if let Some((_, other)) = clash {
            return Err(DomainError::conflict(format!(
                "a return on {date} overlaps the borrowing by {} starting {}",
                other.borrower(),
                other.borrow_date()
            )));
        }

        let record = &mut self.borrow_records[position];
        *record = returned;
        Ok(record)
    }

    /// True when some record keeps the item away on `date`.
    pub fn is_borrowed_on(&self, date: NaiveDate) -> bool {
        self.borrow_records
            .iter()
            .any(|record| record.active_period().contains(date))
    }

    /// Detailed form; long descriptions are shortened.
    pub fn to_detailed_string(&self) -> String {
        if self.description.chars().count() > DETAIL_DESCRIPTION_LIMIT {
            let head: String = self.description.chars().take(DETAIL_DESCRIPTION_KEEP).collect();
            return format!("{} | {} | {head}{ELLIPSIS}", self.name, self.quantity);
        }
        format!("{} | {} | {}", self.name, self.quantity, self.description)
    }

    /// Pipe-delimited form read back by the storage layer.
    pub fn save_string(&self) -> String {
        format!("{} | {} | {}", self.name, self.quantity, self.description)
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} | {}", self.name, self.quantity)
    }
}

/// Equal when the scalar fields match and both hold the same records,
/// regardless of order. The lost flag is not compared.
impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.quantity == other.quantity
            && contains_all(&self.borrow_records, &other.borrow_records)
            && contains_all(&other.borrow_records, &self.borrow_records)
    }
}

impl Eq for Item {}

fn contains_all(haystack: &[BorrowRecord], needles: &[BorrowRecord]) -> bool {
    needles.iter().all(|needle| haystack.contains(needle))
}

/// `|` separates fields in the save form, so names may not carry it.
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("name must not be empty"));
    }
    if name.contains(NAME_FORBIDDEN) {
        return Err(DomainError::validation(format!(
            "name must not contain `{NAME_FORBIDDEN}`"
        )));
    }
    Ok(())
}

fn validate_description(description: &str) -> DomainResult<()> {
    if description.trim().is_empty() {
        return Err(DomainError::validation("description must not be empty"));
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> DomainResult<()> {
    if quantity <= 0 {
        return Err(DomainError::validation(
            "quantity must be non-zero positive integer",
        ));
    }
    Ok(())
}
