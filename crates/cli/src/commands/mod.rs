//! Command execution against the in-memory item list.
//!
//! Each command is fully applied (or rejected with the list untouched)
//! before the next one is read. Results come back as display lines; nothing
//! here prints or touches storage.

mod borrowing;
mod items;

use chrono::NaiveDate;
use thiserror::Error;

use invmgr_core::DomainError;
use invmgr_inventory::ItemList;

use crate::parser::ParseError;
use crate::ui;

/// A parsed user request. Item indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        name: String,
        quantity: i64,
        description: String,
    },
    Delete {
        index: i64,
    },
    Edit {
        index: i64,
        name: Option<String>,
        quantity: Option<i64>,
        description: Option<String>,
    },
    List,
    Describe {
        index: i64,
    },
    Find {
        name: String,
    },
    Borrow {
        index: i64,
        borrower: String,
        start: NaiveDate,
        due: Option<NaiveDate>,
    },
    Return {
        index: i64,
        borrower: String,
    },
    Lost {
        index: i64,
    },
    ListLost,
    ListCurrent {
        borrower: Option<String>,
    },
    ListUpcoming {
        borrower: Option<String>,
    },
    ListOverdue {
        borrower: Option<String>,
    },
    Help,
    Exit,
}

impl Command {
    /// Whether a successful run changes the item list.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add { .. }
                | Command::Delete { .. }
                | Command::Edit { .. }
                | Command::Borrow { .. }
                | Command::Return { .. }
                | Command::Lost { .. }
        )
    }

    pub fn word(&self) -> &'static str {
        match self {
            Command::Add { .. } => "add",
            Command::Delete { .. } => "delete",
            Command::Edit { .. } => "edit",
            Command::List => "list",
            Command::Describe { .. } => "desc",
            Command::Find { .. } => "find",
            Command::Borrow { .. } => "borrow",
            Command::Return { .. } => "return",
            Command::Lost { .. } => "lost",
            Command::ListLost => "listlost",
            Command::ListCurrent { .. } => "listcb",
            Command::ListUpcoming { .. } => "listfb",
            Command::ListOverdue { .. } => "listob",
            Command::Help => "help",
            Command::Exit => "bye",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// What a command produced for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub exit: bool,
}

impl CommandOutput {
    pub fn lines(lines: Vec<String>) -> Self {
        Self { lines, exit: false }
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// Apply `command` to `items`, using `today` for returns and status checks.
pub fn execute(
    command: &Command,
    items: &mut ItemList,
    today: NaiveDate,
) -> Result<CommandOutput, CommandError> {
    let output = match command {
        Command::Add {
            name,
            quantity,
            description,
        } => items::add(items, name, *quantity, description)?,
        Command::Delete { index } => items::delete(items, *index)?,
        Command::Edit {
            index,
            name,
            quantity,
            description,
        } => items::edit(
            items,
            *index,
            name.as_deref(),
            *quantity,
            description.as_deref(),
        )?,
        Command::List => items::list(items),
        Command::Describe { index } => items::describe(items, *index)?,
        Command::Find { name } => items::find(items, name),
        Command::Lost { index } => items::mark_lost(items, *index)?,
        Command::ListLost => items::list_lost(items),
        Command::Borrow {
            index,
            borrower,
            start,
            due,
        } => borrowing::borrow(items, *index, borrower, *start, *due)?,
        Command::Return { index, borrower } => {
            borrowing::return_item(items, *index, borrower, today)?
        }
        Command::ListCurrent { borrower } => borrowing::list_current(items, borrower, today),
        Command::ListUpcoming { borrower } => borrowing::list_upcoming(items, borrower, today),
        Command::ListOverdue { borrower } => borrowing::list_overdue(items, borrower, today),
        Command::Help => CommandOutput::lines(ui::help_lines()),
        Command::Exit => CommandOutput {
            lines: vec![ui::GOODBYE.to_string()],
            exit: true,
        },
    };
    Ok(output)
}
