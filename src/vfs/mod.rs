mod entry;
mod map_fs;
mod transfer;
mod tree_view;

pub use entry::{EntryType, Node};
pub use map_fs::MapFS;
pub use transfer::TransferMode;
pub use tree_view::TreeView;
