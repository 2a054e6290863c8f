//! The batch command language: parsing input lines and dispatching them to an [`FsBackend`].
//!
//! [`FsBackend`]: crate::FsBackend

mod command;
mod parser;
mod runner;

pub use command::{Command, CommandName};
pub use parser::CommandParser;
pub use runner::{ErrorCode, RunError, RunOptions, Runner};
