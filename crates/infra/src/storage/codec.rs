//! Text layout of the data file.
//!
//! ```text
//! camera | 2 | DSLR body
//! 	[LOST]
//! 	alice | 2023-01-01 | 2023-01-05 | -
//! 	bob | 2023-02-01 | - | 2023-02-03
//! ```
//!
//! Item lines use `Item::save_string()`. Tab-indented lines below an item
//! belong to it: `[LOST]` sets the lost flag, anything else is a borrow
//! record `borrower | borrow date | due date | return date` with `-` for
//! an absent date.

use chrono::NaiveDate;

use invmgr_inventory::{BorrowRecord, Item, ItemList};

use super::r#trait::StorageError;

const SEPARATOR: &str = " | ";
const DETAIL_PREFIX: char = '\t';
const LOST_MARKER: &str = "[LOST]";
const NO_DATE: &str = "-";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode(items: &ItemList) -> String {
    let mut out = String::new();
    for item in items.iter() {
        out.push_str(&item.save_string());
        out.push('\n');
        if item.is_lost() {
            out.push(DETAIL_PREFIX);
            out.push_str(LOST_MARKER);
            out.push('\n');
        }
        for record in item.borrow_records() {
            out.push(DETAIL_PREFIX);
            out.push_str(&encode_record(record));
            out.push('\n');
        }
    }
    out
}

fn encode_record(record: &BorrowRecord) -> String {
    [
        record.borrower().to_string(),
        record.borrow_date().format(DATE_FORMAT).to_string(),
        encode_date(record.due_date()),
        encode_date(record.return_date()),
    ]
    .join(SEPARATOR)
}

fn encode_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}

pub fn decode(text: &str) -> Result<ItemList, StorageError> {
    let mut items: Vec<Item> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        match raw.strip_prefix(DETAIL_PREFIX) {
            Some(detail) => {
                let item = items
                    .last_mut()
                    .ok_or_else(|| StorageError::corrupt(line_no, "detail line before any item"))?;
                apply_detail(item, detail, line_no)?;
            }
            None => items.push(decode_item(raw, line_no)?),
        }
    }

    Ok(ItemList::new(items))
}

fn decode_item(line: &str, line_no: usize) -> Result<Item, StorageError> {
    let mut parts = line.splitn(3, SEPARATOR);
    let (Some(name), Some(quantity), Some(description)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(StorageError::corrupt(
            line_no,
            "expected `name | quantity | description`",
        ));
    };

    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| StorageError::corrupt(line_no, format!("invalid quantity `{quantity}`")))?;

    Ok(Item::new(name, quantity, description)?)
}

fn apply_detail(item: &mut Item, detail: &str, line_no: usize) -> Result<(), StorageError> {
    if detail == LOST_MARKER {
        item.mark_as_lost();
        return Ok(());
    }
    let record = decode_record(detail, line_no)?;
    item.add_borrow_record(record)?;
    Ok(())
}

fn decode_record(detail: &str, line_no: usize) -> Result<BorrowRecord, StorageError> {
    // Split from the right so a borrower name may itself contain the separator.
    let mut parts = detail.rsplitn(4, SEPARATOR);
    let (Some(returned), Some(due), Some(borrowed), Some(borrower)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(StorageError::corrupt(
            line_no,
            "expected `borrower | borrow date | due date | return date`",
        ));
    };

    let borrowed = decode_date(borrowed, line_no)?
        .ok_or_else(|| StorageError::corrupt(line_no, "borrow date is required"))?;
    let due = decode_date(due, line_no)?;
    let returned = decode_date(returned, line_no)?;

    let record = BorrowRecord::new(borrower, borrowed, due)?;
    Ok(match returned {
        Some(date) => record.with_return_date(date)?,
        None => record,
    })
}

fn decode_date(raw: &str, line_no: usize) -> Result<Option<NaiveDate>, StorageError> {
    let raw = raw.trim();
    if raw == NO_DATE {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|e| StorageError::corrupt(line_no, format!("invalid date `{raw}`: {e}")))
}
