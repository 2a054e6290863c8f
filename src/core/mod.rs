mod error;
mod narrator;

pub use error::FsError;
pub use narrator::{Level, LogNarrator, Narrator, RecordingNarrator};

/// What a successful mutation did to the tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The tree was changed.
    Applied,
    /// The request was accepted but the tree is untouched (idempotent create,
    /// transfer onto itself, ignored file collision).
    Unchanged,
}

/// The mutation surface the batch runner drives.
///
/// Every method takes raw, user-supplied paths; normalization happens inside.
/// A failed call leaves the backend unchanged.
pub trait FsBackend {
    /// Creates a directory. Fails if the name is already taken.
    fn md(&mut self, path: &str) -> Result<Outcome>;
    /// Creates a file. An existing item with the same name is tolerated.
    fn mf(&mut self, path: &str) -> Result<Outcome>;
    /// Removes a file or a whole directory subtree.
    fn rm(&mut self, path: &str) -> Result<Outcome>;
    /// Copies a file or a directory subtree.
    fn cp(&mut self, source: &str, destination: &str) -> Result<Outcome>;
    /// Moves a file or a directory subtree.
    fn mv(&mut self, source: &str, destination: &str) -> Result<Outcome>;
    /// Human-readable dump of the current tree.
    fn render_tree(&self) -> String;
}

pub type Result<T> = std::result::Result<T, FsError>;
