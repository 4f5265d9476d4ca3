use chrono::NaiveDate;

use invmgr_core::DomainResult;
use invmgr_inventory::{BorrowRecord, ItemList, RecordFilter};

use super::CommandOutput;
use crate::ui;

pub(super) fn borrow(
    items: &mut ItemList,
    index: i64,
    borrower: &str,
    start: NaiveDate,
    due: Option<NaiveDate>,
) -> DomainResult<CommandOutput> {
    let position = items.checked_index(index)?;
    let record = BorrowRecord::new(borrower, start, due)?;
    let item = items.get_item_mut(position)?;
    item.add_borrow_record(record)?;

    tracing::info!(index = position, item = item.name(), borrower, %start, "borrow recorded");
    let until = due.map_or_else(|| "further notice".to_string(), |d| d.to_string());
    Ok(CommandOutput::line(format!(
        "{} has borrowed {} from {start} until {until}.",
        borrower,
        item.name()
    )))
}

pub(super) fn return_item(
    items: &mut ItemList,
    index: i64,
    borrower: &str,
    today: NaiveDate,
) -> DomainResult<CommandOutput> {
    let position = items.checked_index(index)?;
    let item = items.get_item_mut(position)?;
    let name = item.name().to_string();
    let record = item.return_record(borrower, today)?;

    let late = record.due_date().is_some_and(|due| due < today);
    tracing::info!(index = position, item = %name, borrower, late, "return recorded");

    let mut lines = vec![format!("{borrower} has returned {name}.")];
    if late {
        lines.push("This item was returned after its due date.".to_string());
    }
    Ok(CommandOutput::lines(lines))
}

pub(super) fn list_current(
    items: &ItemList,
    borrower: &Option<String>,
    today: NaiveDate,
) -> CommandOutput {
    let filter = RecordFilter::current(today).with_borrower(borrower.clone());
    render(items, &filter, "Here are the current borrowings:", "There are no current borrowings.")
}

pub(super) fn list_upcoming(
    items: &ItemList,
    borrower: &Option<String>,
    today: NaiveDate,
) -> CommandOutput {
    let filter = RecordFilter::upcoming(today).with_borrower(borrower.clone());
    render(items, &filter, "Here are the future borrowings:", "There are no future borrowings.")
}

pub(super) fn list_overdue(
    items: &ItemList,
    borrower: &Option<String>,
    today: NaiveDate,
) -> CommandOutput {
    let filter = RecordFilter::overdue(today).with_borrower(borrower.clone());
    render(items, &filter, "Here are the overdue borrowings:", "There are no overdue borrowings.")
}

fn render(items: &ItemList, filter: &RecordFilter, header: &str, empty: &str) -> CommandOutput {
    let rows: Vec<String> = items
        .filter_records(filter)
        .map(|(i, item, record)| ui::numbered(i, ui::record_summary(item, record, filter.as_of())))
        .collect();

    if rows.is_empty() {
        return CommandOutput::line(empty);
    }
    let mut lines = vec![header.to_string()];
    lines.extend(rows);
    CommandOutput::lines(lines)
}
