//! Command protocol
//!
//! Parsing, dispatch, and rendering of the line-oriented command set.

pub mod commands;
pub mod handlers;
pub mod help;
pub mod suggest;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::handle_command;
