//! Command-line front end: argument parsing, command execution and the
//! interactive session.

pub mod args;
pub mod commands;
pub mod parser;
pub mod session;
pub mod ui;

pub use session::{Session, Today};
