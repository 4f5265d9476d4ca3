//! Record queries: "who currently has what" and "what is overdue".

use chrono::NaiveDate;

use crate::borrow_record::{BorrowRecord, BorrowStatus};

/// Narrows `Ongoing` records by whether the loan has begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timing {
    #[default]
    Any,
    /// Borrow date is on or before the reference day.
    Started,
    /// Borrow date is after the reference day.
    Upcoming,
}

/// Selection criteria for borrow records, evaluated against a reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    borrower: Option<String>,
    status: BorrowStatus,
    timing: Timing,
    as_of: NaiveDate,
}

impl RecordFilter {
    pub fn new(status: BorrowStatus, as_of: NaiveDate) -> Self {
        Self {
            borrower: None,
            status,
            timing: Timing::Any,
            as_of,
        }
    }

    /// Loans in progress on `as_of`.
    pub fn current(as_of: NaiveDate) -> Self {
        Self::new(BorrowStatus::Ongoing, as_of).with_timing(Timing::Started)
    }

    /// Loans booked to start after `as_of`.
    pub fn upcoming(as_of: NaiveDate) -> Self {
        Self::new(BorrowStatus::Ongoing, as_of).with_timing(Timing::Upcoming)
    }

    pub fn overdue(as_of: NaiveDate) -> Self {
        Self::new(BorrowStatus::Overdue, as_of)
    }

    pub fn with_borrower(mut self, borrower: Option<String>) -> Self {
        self.borrower = borrower;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn borrower(&self) -> Option<&str> {
        self.borrower.as_deref()
    }

    pub fn status(&self) -> BorrowStatus {
        self.status
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn matches(&self, record: &BorrowRecord) -> bool {
        record.contains_borrower_name(self.borrower())
            && record.is_status(self.status, self.as_of)
            && self.matches_timing(record)
    }

    fn matches_timing(&self, record: &BorrowRecord) -> bool {
        match self.timing {
            Timing::Any => true,
            Timing::Started => !record.is_upcoming(self.as_of),
            Timing::Upcoming => record.is_upcoming(self.as_of),
        }
    }
}
