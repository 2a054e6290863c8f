use thiserror::Error;

/// Reasons a tree operation is rejected.
///
/// All of them are local and recoverable: the tree is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    /// The path can never name what the operation needs (e.g. a file written with a trailing `/`).
    #[error("invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// A path segment or the target itself does not exist.
    #[error("invalid path {path}: {parent} does not contain the item {name}")]
    NoSuchNode {
        path: String,
        parent: String,
        name: String,
    },

    /// Navigation or placement went through a file.
    #[error("invalid path {path}: {name} is not a directory")]
    NotAContainer { path: String, name: String },

    /// A directory (or a transferred directory) would collide with an existing item.
    #[error("{parent} already contains an item named {name}")]
    AlreadyExists { parent: String, name: String },

    /// A copy or move into the source's own subtree.
    #[error("{item} cannot be placed into its own subdirectory {destination}")]
    SelfContainment { item: String, destination: String },

    /// The root directory is not removable, movable or replaceable.
    #[error("the root directory cannot be {operation}")]
    RootViolation { operation: &'static str },
}

impl FsError {
    pub(crate) fn invalid_file_name(path: &str, basename: &str) -> Self {
        FsError::InvalidPath {
            path: path.to_string(),
            reason: format!("the basename {basename} is not a valid file name"),
        }
    }
}
