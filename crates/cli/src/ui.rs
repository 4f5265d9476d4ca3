//! Console text: prompts, listings and error messages.

use std::fmt::Display;

use chrono::NaiveDate;

use invmgr_core::DomainError;
use invmgr_infra::StorageError;
use invmgr_inventory::{BorrowRecord, Item};

use crate::commands::CommandError;
use crate::parser::ParseError;

pub const WELCOME: &str = "Welcome to InvMgr! Type `help` to see what you can do.";
pub const GOODBYE: &str = "Bye! See you again soon.";
pub const PROMPT: &str = "> ";
pub const EMPTY_LIST: &str = "There are no items in your list.";

const HELP: &[(&str, &str)] = &[
    ("add n/NAME q/QUANTITY d/DESCRIPTION", "Add a new item"),
    ("delete ITEM_NUMBER", "Delete an item"),
    ("edit ITEM_NUMBER [n/NAME] [q/QUANTITY] [d/DESCRIPTION]", "Edit an item"),
    ("list", "List all items"),
    ("desc ITEM_NUMBER", "Show an item's full description"),
    ("find n/NAME", "Find items by exact name"),
    ("borrow ITEM_NUMBER u/BORROWER s/YYYY-MM-DD [e/YYYY-MM-DD]", "Record a borrowing"),
    ("return ITEM_NUMBER u/BORROWER", "Record a return (dated today)"),
    ("lost ITEM_NUMBER", "Mark an item as lost"),
    ("listlost", "List lost items"),
    ("listcb [u/BORROWER]", "List current borrowings"),
    ("listfb [u/BORROWER]", "List future borrowings"),
    ("listob [u/BORROWER]", "List overdue borrowings"),
    ("help", "Show this message"),
    ("bye", "Save and exit"),
];

pub fn help_lines() -> Vec<String> {
    let mut lines = vec!["Here are the commands you can use:".to_string()];
    lines.extend(HELP.iter().map(|(usage, what)| format!("  {usage}\n      {what}")));
    lines
}

/// 0-based position rendered with the 1-based display number.
pub fn numbered(index: usize, text: impl Display) -> String {
    format!("{}. {text}", index + 1)
}

pub fn item_summary(item: &Item) -> String {
    if item.is_lost() {
        format!("{item} [LOST]")
    } else {
        item.to_string()
    }
}

pub fn record_summary(item: &Item, record: &BorrowRecord, today: NaiveDate) -> String {
    format!("{} | {record} [{}]", item.name(), record.status_on(today))
}

pub fn error_message(error: &CommandError) -> String {
    match error {
        CommandError::Parse(e) => parse_error_message(e),
        CommandError::Domain(e) => domain_error_message(e),
    }
}

fn parse_error_message(error: &ParseError) -> String {
    match error {
        ParseError::UnknownCommand(word) => {
            format!("I don't know the command `{word}`. Type `help` to see what you can do.")
        }
        other => format!("Invalid syntax: {other}."),
    }
}

fn domain_error_message(error: &DomainError) -> String {
    match error {
        DomainError::Validation(msg) => format!("Invalid value: {msg}."),
        DomainError::Conflict(msg) => format!("Date clash: {msg}."),
        DomainError::IndexOutOfRange { index, size } => match size {
            0 => "There are no items in your list.".to_string(),
            _ => format!(
                "Item number {} does not exist. Choose a number from 1 to {size}.",
                index.saturating_add(1)
            ),
        },
        DomainError::InvalidState(msg) => format!("Cannot update: {msg}."),
        DomainError::NotFound(msg) => format!("Nothing to update: {msg}."),
    }
}

pub fn storage_error_message(error: &StorageError) -> String {
    format!("Could not save your changes: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_errors_are_shown_one_based() {
        let err = CommandError::Domain(DomainError::index_out_of_range(3, 3));
        assert_eq!(
            error_message(&err),
            "Item number 4 does not exist. Choose a number from 1 to 3."
        );

        let err = CommandError::Domain(DomainError::index_out_of_range(-1, 0));
        assert_eq!(error_message(&err), "There are no items in your list.");
    }

    #[test]
    fn each_error_kind_has_its_own_message() {
        let conflict = error_message(&DomainError::conflict("dates conflict").into());
        let validation = error_message(&DomainError::validation("bad").into());
        let state = error_message(&DomainError::invalid_state("returned").into());
        let missing = error_message(&DomainError::not_found("none").into());
        let parse = error_message(&ParseError::MissingArgument("x").into());

        assert!(conflict.starts_with("Date clash"));
        assert!(validation.starts_with("Invalid value"));
        assert!(state.starts_with("Cannot update"));
        assert!(missing.starts_with("Nothing to update"));
        assert!(parse.starts_with("Invalid syntax"));
    }

    #[test]
    fn lost_items_are_tagged() {
        let mut item = Item::new("lens", 1, "50mm").unwrap();
        assert_eq!(item_summary(&item), "lens | 1");
        item.mark_as_lost();
        assert_eq!(item_summary(&item), "lens | 1 [LOST]");
    }

    #[test]
    fn record_summary_includes_derived_status() {
        let item = Item::new("lens", 1, "50mm").unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).unwrap();
        let record = BorrowRecord::new("amy", day(1), Some(day(3))).unwrap();

        assert_eq!(
            record_summary(&item, &record, day(5)),
            "lens | amy | 2023-01-01 to 2023-01-03 [OVERDUE]"
        );
    }
}
