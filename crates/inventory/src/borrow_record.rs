use chrono::NaiveDate;

use invmgr_core::{DomainError, DomainResult, ValueObject};

use crate::conflict::{ActivePeriod, ConflictDetector};

/// Lifecycle stage of a borrow record, as observed on a given day.
///
/// Only the `Ongoing -> Returned` transition is stored. `Overdue` is derived
/// from the due date whenever a status is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorrowStatus {
    Ongoing,
    Returned,
    Overdue,
}

impl core::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            BorrowStatus::Ongoing => "ONGOING",
            BorrowStatus::Returned => "RETURNED",
            BorrowStatus::Overdue => "OVERDUE",
        };
        f.write_str(label)
    }
}

/// One loan of an item: who borrowed it, from when, until when, and whether
/// it came back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BorrowRecord {
    borrower: String,
    borrow_date: NaiveDate,
    due_date: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
}

impl ValueObject for BorrowRecord {}

impl BorrowRecord {
    /// Create a new, not yet returned, borrow record.
    ///
    /// A missing due date makes the loan open-ended.
    pub fn new(
        borrower: impl Into<String>,
        borrow_date: NaiveDate,
        due_date: Option<NaiveDate>,
    ) -> DomainResult<Self> {
        let borrower = borrower.into();
        if borrower.trim().is_empty() {
            return Err(DomainError::validation("borrower name cannot be empty"));
        }
        if let Some(due) = due_date {
            if due < borrow_date {
                return Err(DomainError::validation(
                    "due date cannot be earlier than borrow date",
                ));
            }
        }

        Ok(Self {
            borrower,
            borrow_date,
            due_date,
            return_date: None,
        })
    }

    /// Rebuild a record that has already been returned (used when loading history).
    pub fn with_return_date(mut self, return_date: NaiveDate) -> DomainResult<Self> {
        self.mark_returned(return_date)?;
        Ok(self)
    }

    pub fn borrower(&self) -> &str {
        &self.borrower
    }

    pub fn borrow_date(&self) -> NaiveDate {
        self.borrow_date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    /// Status of the record as seen on `today`.
    pub fn status_on(&self, today: NaiveDate) -> BorrowStatus {
        if self.is_returned() {
            return BorrowStatus::Returned;
        }
        match self.due_date {
            Some(due) if due < today => BorrowStatus::Overdue,
            _ => BorrowStatus::Ongoing,
        }
    }

    pub fn is_status(&self, status: BorrowStatus, today: NaiveDate) -> bool {
        self.status_on(today) == status
    }

    /// True when the loan has not started yet on `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.borrow_date > today
    }

    /// `None` means no filter: every record matches.
    pub fn contains_borrower_name(&self, name: Option<&str>) -> bool {
        match name {
            Some(name) => self.borrower == name,
            None => true,
        }
    }

    /// Span during which the borrowed unit is away.
    ///
    /// Ends at the return date if known, otherwise at the due date, otherwise never.
    pub fn active_period(&self) -> ActivePeriod {
        ActivePeriod::new(self.borrow_date, self.return_date.or(self.due_date))
    }

    pub fn is_conflict(&self, other: &BorrowRecord) -> bool {
        ConflictDetector::conflicts(self, other)
    }

    /// Record the physical return of the item. `Returned` is terminal.
    pub fn mark_returned(&mut self, return_date: NaiveDate) -> DomainResult<()> {
        if let Some(returned) = self.return_date {
            return Err(DomainError::invalid_state(format!(
                "borrow record for {} was already returned on {returned}",
                self.borrower
            )));
        }
        if return_date < self.borrow_date {
            return Err(DomainError::validation(
                "return date cannot be earlier than borrow date",
            ));
        }
        self.return_date = Some(return_date);
        Ok(())
    }
}

impl core::fmt::Display for BorrowRecord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} | {}", self.borrower, self.borrow_date)?;
        match self.due_date {
            Some(due) => write!(f, " to {due}")?,
            None => f.write_str(" (open-ended)")?,
        }
        if let Some(returned) = self.return_date {
            write!(f, " | returned {returned}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(from: NaiveDate, to: NaiveDate) -> BorrowRecord {
        BorrowRecord::new("alice", from, Some(to)).unwrap()
    }

    #[test]
    fn new_rejects_empty_borrower() {
        let err = BorrowRecord::new("  ", date(2023, 1, 1), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_rejects_due_before_borrow() {
        let err = BorrowRecord::new("alice", date(2023, 1, 5), Some(date(2023, 1, 4))).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn same_day_loan_is_valid() {
        let r = record(date(2023, 1, 5), date(2023, 1, 5));
        assert_eq!(r.borrow_date(), r.due_date().unwrap());
    }

    #[test]
    fn status_is_derived_from_today() {
        let r = record(date(2023, 1, 1), date(2023, 1, 10));
        assert_eq!(r.status_on(date(2023, 1, 5)), BorrowStatus::Ongoing);
        assert_eq!(r.status_on(date(2023, 1, 10)), BorrowStatus::Ongoing);
        assert_eq!(r.status_on(date(2023, 1, 11)), BorrowStatus::Overdue);
    }

    #[test]
    fn open_ended_loan_is_never_overdue() {
        let r = BorrowRecord::new("bob", date(2023, 1, 1), None).unwrap();
        assert_eq!(r.status_on(date(2030, 1, 1)), BorrowStatus::Ongoing);
    }

    #[test]
    fn mark_returned_transitions_to_returned() {
        let mut r = record(date(2023, 1, 1), date(2023, 1, 10));
        r.mark_returned(date(2023, 1, 12)).unwrap();
        assert_eq!(r.return_date(), Some(date(2023, 1, 12)));
        assert!(r.is_status(BorrowStatus::Returned, date(2023, 2, 1)));
    }

    #[test]
    fn returned_is_terminal() {
        let mut r = record(date(2023, 1, 1), date(2023, 1, 10));
        r.mark_returned(date(2023, 1, 3)).unwrap();

        let err = r.mark_returned(date(2023, 1, 4)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(r.return_date(), Some(date(2023, 1, 3)));
    }

    #[test]
    fn return_before_borrow_is_rejected() {
        let mut r = record(date(2023, 1, 5), date(2023, 1, 10));
        let err = r.mark_returned(date(2023, 1, 4)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(!r.is_returned());
    }

    #[test]
    fn borrower_filter_is_exact_and_case_sensitive() {
        let r = record(date(2023, 1, 1), date(2023, 1, 2));
        assert!(r.contains_borrower_name(None));
        assert!(r.contains_borrower_name(Some("alice")));
        assert!(!r.contains_borrower_name(Some("Alice")));
        assert!(!r.contains_borrower_name(Some("ali")));
    }

    #[test]
    fn clone_is_independent() {
        let original = record(date(2023, 1, 1), date(2023, 1, 10));
        let mut copy = original.clone();
        copy.mark_returned(date(2023, 1, 2)).unwrap();

        assert!(!original.is_returned());
        assert!(copy.is_returned());
    }

    #[test]
    fn display_shows_dates_and_return() {
        let mut r = record(date(2023, 1, 1), date(2023, 1, 10));
        assert_eq!(r.to_string(), "alice | 2023-01-01 to 2023-01-10");
        r.mark_returned(date(2023, 1, 9)).unwrap();
        assert_eq!(
            r.to_string(),
            "alice | 2023-01-01 to 2023-01-10 | returned 2023-01-09"
        );
    }
}
