//! Interactive read-execute-print loop.

use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDate};

use invmgr_infra::{ItemStore, StorageError};
use invmgr_inventory::ItemList;

use crate::commands::{self, CommandError, CommandOutput};
use crate::parser;
use crate::ui;

/// Source of "today" for returns and status checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Today {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Today {
    pub fn date(self) -> NaiveDate {
        match self {
            Today::System => Local::now().date_naive(),
            Today::Fixed(date) => date,
        }
    }
}

/// One running session: the in-memory list plus where it is persisted.
pub struct Session<S> {
    items: ItemList,
    store: S,
    autosave: bool,
    today: Today,
}

impl<S: ItemStore> Session<S> {
    /// Load the list from `store`.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let items = store.load()?;
        tracing::info!(items = items.size(), "session opened");
        Ok(Self {
            items,
            store,
            autosave: true,
            today: Today::System,
        })
    }

    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    pub fn with_today(mut self, today: Today) -> Self {
        self.today = today;
        self
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    /// Handle one line of input, returning what to show the user.
    pub fn handle_line(&mut self, line: &str) -> CommandOutput {
        let command = match parser::parse(line) {
            Ok(command) => command,
            Err(err) => {
                tracing::debug!(error = %err, "rejected input");
                return CommandOutput::line(ui::error_message(&CommandError::Parse(err)));
            }
        };

        let mut output = match commands::execute(&command, &mut self.items, self.today.date()) {
            Ok(output) => output,
            Err(err) => {
                tracing::debug!(command = command.word(), error = %err, "command failed");
                return CommandOutput::line(ui::error_message(&err));
            }
        };

        let should_save = (command.is_mutating() && self.autosave) || output.exit;
        if should_save {
            if let Err(err) = self.store.save(&self.items) {
                tracing::warn!(error = %err, "save failed");
                output.lines.push(ui::storage_error_message(&err));
            }
        }
        output
    }

    /// Run until `bye` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", ui::WELCOME)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}", ui::PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next().transpose()? else {
                writeln!(out)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let output = self.handle_line(&line);
            for text in &output.lines {
                writeln!(out, "{text}")?;
            }
            if output.exit {
                return Ok(());
            }
        }

        // End of input without `bye`: keep unsaved work when autosave is off.
        if !self.autosave {
            if let Err(err) = self.store.save(&self.items) {
                writeln!(out, "{}", ui::storage_error_message(&err))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invmgr_infra::InMemoryItemStore;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session(store: Arc<InMemoryItemStore>) -> Session<Arc<InMemoryItemStore>> {
        Session::open(store)
            .unwrap()
            .with_today(Today::Fixed(date(2023, 1, 10)))
    }

    #[test]
    fn mutating_commands_autosave() {
        let store = Arc::new(InMemoryItemStore::new());
        let mut s = session(store.clone());

        s.handle_line("add n/lens q/1 d/50mm");
        s.handle_line("list");

        assert_eq!(store.save_count(), 1);
        assert_eq!(store.contents(), "lens | 1 | 50mm\n");
    }

    #[test]
    fn failed_commands_do_not_save() {
        let store = Arc::new(InMemoryItemStore::new());
        let mut s = session(store.clone());

        let out = s.handle_line("delete 1");
        assert_eq!(out.lines, vec!["There are no items in your list."]);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn without_autosave_only_bye_saves() {
        let store = Arc::new(InMemoryItemStore::new());
        let mut s = session(store.clone()).with_autosave(false);

        s.handle_line("add n/lens q/1 d/50mm");
        assert_eq!(store.save_count(), 0);

        let out = s.handle_line("bye");
        assert!(out.exit);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn return_uses_session_today() {
        let store = Arc::new(InMemoryItemStore::new());
        let mut s = session(store.clone());

        s.handle_line("add n/lens q/1 d/50mm");
        s.handle_line("borrow 1 u/amy s/2023-01-01 e/2023-01-05");
        s.handle_line("return 1 u/amy");

        let record = &s.items().get_item(0).unwrap().borrow_records()[0];
        assert_eq!(record.return_date(), Some(date(2023, 1, 10)));
    }
}
