//! Copy and move.
//!
//! Both operations share one pipeline: normalize both paths, validate everything against the live
//! tree, decide where the item lands, then perform a single structural change.

use crate::core::{FsError, Outcome, Result};
use crate::path::{self, PathInfo, ROOT};

use super::entry::Node;
use super::map_fs::MapFS;

/// Whether the source survives a transfer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}

impl TransferMode {
    fn noun(self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            TransferMode::Copy => "copied",
            TransferMode::Move => "moved",
        }
    }
}

/// How the landing spot was chosen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Landing {
    /// The destination was `/`: the item keeps its name.
    Root,
    /// The destination names an existing item: the item goes inside it and keeps its name.
    IntoExisting,
    /// The destination names a free spot: the item takes the destination's basename.
    Renamed,
}

/// Where a transfer lands.
#[derive(Debug)]
pub(crate) struct Placement<'a> {
    pub landing: Landing,
    /// The item that will own the transferred node. Not necessarily a directory yet.
    pub container: &'a Node,
    /// Normalized path of `container`.
    pub container_path: String,
    /// Name of the transferred node under `container`.
    pub name: String,
}

/// Decides between "rename to the destination" and "drop into the destination".
///
/// `destination_parent` is the live node at `destination.parent`. A destination naming an item
/// that already exists there is always treated as a drop-into, whatever that item is; the caller
/// rejects non-directory containers afterwards.
pub(crate) fn place<'a>(
    source: &PathInfo,
    destination: &PathInfo,
    destination_parent: &'a Node,
) -> Placement<'a> {
    if destination.is_root() {
        return Placement {
            landing: Landing::Root,
            container: destination_parent,
            container_path: ROOT.to_string(),
            name: source.basename.clone(),
        };
    }

    if let Some(existing) = destination_parent.child(&destination.basename) {
        return Placement {
            landing: Landing::IntoExisting,
            container: existing,
            container_path: destination.full_path(),
            name: source.basename.clone(),
        };
    }

    Placement {
        landing: Landing::Renamed,
        container: destination_parent,
        container_path: destination.parent.clone(),
        name: destination.basename.clone(),
    }
}

impl MapFS {
    /// Copies or moves the item at `source` to `destination`.
    ///
    /// * A destination naming an existing item means "put it inside", keeping the source name.
    /// * A destination naming a free spot means "put it there under that name".
    /// * `/` as destination means "put it in the root", keeping the source name.
    ///
    /// Transferring an item onto itself is a silent success. A file that collides with an existing
    /// name at the landing spot is skipped with a notice, a directory is rejected. Failures are
    /// narrated and leave the tree untouched.
    pub fn transfer(
        &mut self,
        source: &str,
        destination: &str,
        mode: TransferMode,
    ) -> Result<Outcome> {
        let result = self.try_transfer(source, destination, mode);
        self.report(result)
    }

    fn try_transfer(
        &mut self,
        source: &str,
        destination: &str,
        mode: TransferMode,
    ) -> Result<Outcome> {
        let source = path::normalize(source);
        let destination = path::normalize(destination);
        let src = PathInfo::resolve(&source, None);
        let dst = PathInfo::resolve(&destination, None);

        if src.is_root() {
            return Err(FsError::RootViolation {
                operation: mode.past_tense(),
            });
        }

        let effective_name = if dst.is_root() {
            &src.basename
        } else {
            &dst.basename
        };

        let src_full = src.full_path();
        let dst_full = dst.full_path();
        if src_full == dst_full || (src.parent == ROOT && dst.is_root()) {
            return Ok(Outcome::Unchanged);
        }
        if path::is_strict_descendant(&dst_full, &src_full) {
            return Err(FsError::SelfContainment {
                item: source,
                destination,
            });
        }

        let source_parent = self.navigate(&src.parent)?;
        if !source_parent.is_dir() {
            return Err(FsError::NotAContainer {
                path: source,
                name: src.parent,
            });
        }
        let Some(node) = source_parent.child(&src.basename) else {
            return Err(FsError::NoSuchNode {
                path: source,
                parent: src.parent,
                name: src.basename,
            });
        };

        let destination_parent = self.navigate(&dst.parent)?;
        if src.parent == dst.parent && src.basename == *effective_name {
            return Ok(Outcome::Unchanged);
        }
        if !destination_parent.is_dir() {
            return Err(FsError::NotAContainer {
                path: destination,
                name: dst.parent,
            });
        }

        if node.is_file() && src.trailing_separator {
            return Err(FsError::invalid_file_name(
                &source,
                &format!("{}/", src.basename),
            ));
        }

        let placement = place(&src, &dst, destination_parent);
        if placement.landing == Landing::Renamed && node.is_file() && dst.trailing_separator {
            return Err(FsError::invalid_file_name(
                &destination,
                &format!("{}/", dst.basename),
            ));
        }
        if !placement.container.is_dir() {
            return Err(FsError::NotAContainer {
                path: destination,
                name: placement.container_path,
            });
        }

        let kind = node.entry_type().as_str();
        if placement.container.contains(&placement.name) {
            if node.is_dir() {
                return Err(FsError::AlreadyExists {
                    parent: placement.container_path,
                    name: placement.name,
                });
            }
            self.narrator().info(&format!(
                "Ignore {} of {kind} {source} in {} because an item with such a name already exists there.",
                mode.noun(),
                placement.container_path
            ));
            return Ok(Outcome::Unchanged);
        }

        let Placement {
            container_path,
            name,
            ..
        } = placement;

        match mode {
            TransferMode::Copy => {
                let copy = node.copy_as(&name);
                self.container_mut(&container_path)?.attach(copy);
            }
            TransferMode::Move => {
                let mut moved = self
                    .container_mut(&src.parent)?
                    .detach(&src.basename)
                    .ok_or_else(|| FsError::NoSuchNode {
                        path: source.clone(),
                        parent: src.parent.clone(),
                        name: src.basename.clone(),
                    })?;
                moved.rename(&name);

                match self.navigate_mut(&container_path) {
                    Some(target) => target.attach(moved),
                    None => {
                        // put it back where it was
                        moved.rename(&src.basename);
                        self.container_mut(&src.parent)?.attach(moved);
                        return Err(FsError::NoSuchNode {
                            path: destination,
                            parent: ROOT.to_string(),
                            name: container_path,
                        });
                    }
                }
            }
        }

        self.narrator().info(&format!(
            "The {kind} {source} is {} in {container_path} with name {name}.",
            mode.past_tense()
        ));
        Ok(Outcome::Applied)
    }
}
