//! Turns a line of user input into a [`Command`].
//!
//! Indices typed by the user are 1-based; parsed commands carry 0-based
//! indices, still signed so that `0` typed by the user surfaces as an
//! out-of-range index rather than a parse failure.

pub mod tokenizer;

use chrono::NaiveDate;
use thiserror::Error;

use crate::commands::Command;
use tokenizer::{ArgumentMap, Prefix, tokenize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const EDITABLE: &[Prefix] = &[Prefix::Name, Prefix::Quantity, Prefix::Description];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no command given")]
    Empty,

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a valid item number")]
    InvalidIndex(String),

    #[error("`{0}` is not a valid quantity")]
    InvalidQuantity(String),

    #[error("`{0}` is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("unexpected arguments `{0}`")]
    UnexpectedArguments(String),

    #[error("nothing to edit: give at least one of n/, q/ or d/")]
    NothingToEdit,
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, args) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, a)| (w, a.trim()));

    match word {
        "" => Err(ParseError::Empty),
        "add" => parse_add(args),
        "delete" => Ok(Command::Delete {
            index: parse_index(args)?,
        }),
        "edit" => parse_edit(args),
        "list" => no_arguments(args, Command::List),
        "desc" => Ok(Command::Describe {
            index: parse_index(args)?,
        }),
        "find" => parse_find(args),
        "borrow" => parse_borrow(args),
        "return" => parse_return(args),
        "lost" => Ok(Command::Lost {
            index: parse_index(args)?,
        }),
        "listlost" => no_arguments(args, Command::ListLost),
        "listcb" => Ok(Command::ListCurrent {
            borrower: parse_borrower_filter(args)?,
        }),
        "listfb" => Ok(Command::ListUpcoming {
            borrower: parse_borrower_filter(args)?,
        }),
        "listob" => Ok(Command::ListOverdue {
            borrower: parse_borrower_filter(args)?,
        }),
        "help" => no_arguments(args, Command::Help),
        "bye" => no_arguments(args, Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[Prefix::Name, Prefix::Quantity, Prefix::Description]);
    ensure_no_preamble(&map)?;

    Ok(Command::Add {
        name: required(&map, Prefix::Name, "item name (n/)")?.to_string(),
        quantity: parse_quantity(required(&map, Prefix::Quantity, "quantity (q/)")?)?,
        description: required(&map, Prefix::Description, "description (d/)")?.to_string(),
    })
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, EDITABLE);
    let index = parse_index(map.preamble())?;

    if !EDITABLE.iter().any(|&prefix| map.has(prefix)) {
        return Err(ParseError::NothingToEdit);
    }

    let name = map.value(Prefix::Name).map(str::to_string);
    let quantity = map.value(Prefix::Quantity).map(parse_quantity).transpose()?;
    let description = map.value(Prefix::Description).map(str::to_string);

    Ok(Command::Edit {
        index,
        name,
        quantity,
        description,
    })
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[Prefix::Name]);
    ensure_no_preamble(&map)?;
    Ok(Command::Find {
        name: required(&map, Prefix::Name, "item name (n/)")?.to_string(),
    })
}

fn parse_borrow(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[Prefix::Borrower, Prefix::Start, Prefix::End]);
    let index = parse_index(map.preamble())?;

    Ok(Command::Borrow {
        index,
        borrower: required(&map, Prefix::Borrower, "borrower name (u/)")?.to_string(),
        start: parse_date(required(&map, Prefix::Start, "start date (s/)")?)?,
        due: map.value(Prefix::End).map(parse_date).transpose()?,
    })
}

fn parse_return(args: &str) -> Result<Command, ParseError> {
    let map = tokenize(args, &[Prefix::Borrower]);
    let index = parse_index(map.preamble())?;

    Ok(Command::Return {
        index,
        borrower: required(&map, Prefix::Borrower, "borrower name (u/)")?.to_string(),
    })
}

/// Either nothing, or `u/NAME` alone.
fn parse_borrower_filter(args: &str) -> Result<Option<String>, ParseError> {
    let map = tokenize(args, &[Prefix::Borrower]);
    if map.is_empty() {
        return Ok(None);
    }
    ensure_no_preamble(&map)?;
    match map.value(Prefix::Borrower) {
        Some(name) if !name.is_empty() => Ok(Some(name.to_string())),
        _ => Err(ParseError::MissingArgument("borrower name (u/)")),
    }
}

fn no_arguments(args: &str, command: Command) -> Result<Command, ParseError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::UnexpectedArguments(args.to_string()))
    }
}

fn ensure_no_preamble(map: &ArgumentMap) -> Result<(), ParseError> {
    if map.preamble().is_empty() {
        Ok(())
    } else {
        Err(ParseError::UnexpectedArguments(map.preamble().to_string()))
    }
}

fn required<'a>(
    map: &'a ArgumentMap,
    prefix: Prefix,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    map.value(prefix)
        .filter(|v| !v.is_empty())
        .ok_or(ParseError::MissingArgument(what))
}

/// 1-based display number to 0-based index.
fn parse_index(raw: &str) -> Result<i64, ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingArgument("item number"));
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| ParseError::InvalidIndex(raw.to_string()))
}

fn parse_quantity(raw: &str) -> Result<i64, ParseError> {
    raw.trim()
        .parse()
        .map_err(|_| ParseError::InvalidQuantity(raw.to_string()))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(raw.to_string()))
}
