//! Date-range overlap detection between borrow records.
//!
//! A single unit cannot be lent out twice at the same time, so any two
//! records whose active periods share at least one day conflict. The borrower
//! is not considered: the same person cannot hold two overlapping loans of
//! one item either.

use chrono::NaiveDate;

use crate::borrow_record::BorrowRecord;

/// Inclusive day range during which a unit is out. `end == None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePeriod {
    start: NaiveDate,
    end: Option<NaiveDate>,
}

impl ActivePeriod {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && self.end.is_none_or(|end| day <= end)
    }

    pub fn overlaps(&self, other: &ActivePeriod) -> bool {
        starts_by(self.start, other.end) && starts_by(other.start, self.end)
    }
}

fn starts_by(start: NaiveDate, end: Option<NaiveDate>) -> bool {
    end.is_none_or(|end| start <= end)
}

/// Pure predicate over pairs of borrow records.
pub struct ConflictDetector;

impl ConflictDetector {
    pub fn conflicts(a: &BorrowRecord, b: &BorrowRecord) -> bool {
        a.active_period().overlaps(&b.active_period())
    }

    /// First record in `existing` that conflicts with `candidate`, if any.
    pub fn first_conflict<'a>(
        candidate: &BorrowRecord,
        existing: &'a [BorrowRecord],
    ) -> Option<&'a BorrowRecord> {
        existing.iter().find(|record| Self::conflicts(candidate, record))
    }
}
