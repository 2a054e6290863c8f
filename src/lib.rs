//! An in-memory file tree driven by a small batch command language.
//!
//! ### Overview
//!
//! `vfs-batch` keeps a hierarchy of named directories and files purely in memory and mutates it
//! through five commands: `md` (make directory), `mf` (make file), `rm` (remove), `cp` (copy) and
//! `mv` (move). Files are named placeholders only; there is no content, no persistence and no
//! permissions.
//!
//! **Key ideas**:
//! - **Path semantics first**: every path goes through one normalizer and one resolver, so
//!   `//a/ b /` and `/a/b/` mean the same thing everywhere.
//! - **All or nothing**: each operation validates everything before touching the tree, so a
//!   rejected command leaves the tree exactly as it was.
//! - **Testability**: narration goes through an injected [`Narrator`], so tests can record
//!   every line without console side effects.
//!
//! ### Example
//!
//! ```
//! use vfs_batch::{FsBackend, MapFS, RecordingNarrator};
//!
//! let mut fs = MapFS::with_narrator(RecordingNarrator::new());
//! fs.md("/a").unwrap();
//! fs.md("/a/b").unwrap();
//! fs.mf("/a/b/f.txt").unwrap();
//! fs.mv("/a/b", "/c").unwrap();
//!
//! assert!(fs.exists("/c/f.txt"));
//! assert!(!fs.exists("/a/b"));
//! ```

pub mod batch;
mod core;
pub mod path;
mod vfs;

pub use batch::{Command, CommandName, CommandParser, ErrorCode, RunError, RunOptions, Runner};
pub use core::{
    FsBackend, FsError, Level, LogNarrator, Narrator, Outcome, RecordingNarrator, Result,
};
pub use vfs::{EntryType, MapFS, Node, TransferMode, TreeView};
