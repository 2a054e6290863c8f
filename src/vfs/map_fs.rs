//! This module provides the in-memory tree that owns every node and executes the batch commands.

use crate::core::{FsBackend, FsError, LogNarrator, Narrator, Outcome, Result};
use crate::path::{self, NodeKind, PathInfo, ROOT};

use super::entry::{EntryType, Node};
use super::transfer::TransferMode;
use super::tree_view::TreeView;

/// A virtual file system (VFS) that keeps a tree of named directories and files in memory.
///
/// ### Internal state
///
/// * `root`: The root directory `/`. It always exists, is always a directory and can be neither
///   removed nor replaced. Every other node is owned by exactly one parent directory.
///
/// * `narrator`: Receives one human-readable line per state change or rejection. It is injected,
///   so tests can record narration instead of printing it.
///
/// ### Paths
///
/// All public methods accept raw paths. They are normalized (see [`path::normalize`]) and then
/// resolved by walking the tree from the root on every call; nothing is cached.
///
/// ### Invariants
///
/// 1. **Root existence**: `/` is always present and is a directory.
/// 2. **Uniqueness**: names are unique within a directory.
/// 3. **Leaves**: files never have children.
/// 4. **All or nothing**: every check runs before the first structural change, so a rejected
///    operation leaves the tree untouched.
///
/// ### Thread Safety
///
/// This struct is **not thread-safe**. It is meant to be driven by one batch runner at a time.
///
/// ### Example
///
/// ```
/// use vfs_batch::{FsBackend, MapFS};
///
/// let mut fs = MapFS::new();
///
/// fs.md("/docs").unwrap();
/// fs.mf("/docs/note.txt").unwrap();
/// assert!(fs.exists("/docs/note.txt"));
///
/// fs.rm("/docs").unwrap();
/// assert!(!fs.exists("/docs/note.txt"));
/// ```
pub struct MapFS {
    root: Node,
    narrator: Box<dyn Narrator>,
}

impl MapFS {
    /// Creates an empty tree that narrates through the `log` facade.
    pub fn new() -> Self {
        Self::with_narrator(LogNarrator)
    }

    /// Creates an empty tree with a custom narration sink.
    pub fn with_narrator<N: Narrator + 'static>(narrator: N) -> Self {
        Self {
            root: Node::root(),
            narrator: Box::new(narrator),
        }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Returns a displayable view of the whole tree.
    pub fn tree_view(&self) -> TreeView<'_> {
        TreeView::new(&self.root)
    }

    /// Looks up the node a raw path refers to.
    ///
    /// Lookups are silent: failures are returned, not narrated. A file written with a trailing
    /// separator is an invalid reference.
    pub fn get(&self, path: &str) -> Result<&Node> {
        let normalized = path::normalize(path);
        let info = PathInfo::resolve(&normalized, None);
        if info.is_root() {
            return Ok(&self.root);
        }

        let parent = self.navigate(&info.parent)?;
        if !parent.is_dir() {
            return Err(FsError::NotAContainer {
                path: normalized,
                name: info.parent,
            });
        }
        let node = parent
            .child(&info.basename)
            .ok_or_else(|| FsError::NoSuchNode {
                path: normalized.clone(),
                parent: info.parent.clone(),
                name: info.basename.clone(),
            })?;

        if node.is_file() && info.trailing_separator {
            return Err(FsError::invalid_file_name(
                &normalized,
                &format!("{}/", info.basename),
            ));
        }
        Ok(node)
    }

    /// Checks if a `path` exists in the VFS.
    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_ok()
    }

    /// Checks if `path` is a directory.
    pub fn is_dir(&self, path: &str) -> Result<bool> {
        Ok(self.get(path)?.is_dir())
    }

    /// Checks if `path` is a file.
    pub fn is_file(&self, path: &str) -> Result<bool> {
        Ok(self.get(path)?.is_file())
    }

    /// Names of the immediate children of a directory, in ascending order.
    pub fn ls(&self, path: &str) -> Result<Vec<&str>> {
        let node = self.get(path)?;
        if !node.is_dir() {
            return Err(FsError::NotAContainer {
                path: path::normalize(path),
                name: node.name().to_string(),
            });
        }
        Ok(node.children().map(Node::name).collect())
    }

    /// Walks from the root to the node at `normalized`.
    ///
    /// Fails when a segment is missing or when the walk has to pass through a file. The node at
    /// the end of the walk may itself be a file; callers decide whether that is acceptable.
    pub(crate) fn navigate(&self, normalized: &str) -> Result<&Node> {
        let mut node = &self.root;
        let mut walked = ROOT.to_string();

        for segment in path::segments(normalized) {
            if !node.is_dir() {
                return Err(FsError::NotAContainer {
                    path: normalized.to_string(),
                    name: walked,
                });
            }
            node = node.child(segment).ok_or_else(|| FsError::NoSuchNode {
                path: normalized.to_string(),
                parent: walked.clone(),
                name: segment.to_string(),
            })?;
            walked = path::join(&walked, segment);
        }

        Ok(node)
    }

    /// Mutable counterpart of [`MapFS::navigate`], used once validation has passed.
    pub(crate) fn navigate_mut(&mut self, normalized: &str) -> Option<&mut Node> {
        let mut node = &mut self.root;
        for segment in path::segments(normalized) {
            node = node.child_mut(segment)?;
        }
        Some(node)
    }

    pub(crate) fn container_mut(&mut self, normalized: &str) -> Result<&mut Node> {
        self.navigate_mut(normalized)
            .ok_or_else(|| FsError::NoSuchNode {
                path: normalized.to_string(),
                parent: ROOT.to_string(),
                name: normalized.to_string(),
            })
    }

    pub(crate) fn narrator(&self) -> &dyn Narrator {
        self.narrator.as_ref()
    }

    fn create(&mut self, path: &str, entry_type: EntryType) -> Result<Outcome> {
        let normalized = path::normalize(path);
        let required = match entry_type {
            EntryType::Directory => NodeKind::Directory,
            EntryType::File => NodeKind::File,
        };
        let info = PathInfo::resolve(&normalized, Some(required));

        if info.kind == NodeKind::Invalid {
            return Err(FsError::invalid_file_name(&normalized, &info.basename));
        }
        if info.basename.is_empty() {
            return Err(FsError::RootViolation {
                operation: "recreated",
            });
        }

        let parent = self.navigate(&info.parent)?;
        if !parent.is_dir() {
            return Err(FsError::NotAContainer {
                path: normalized,
                name: info.parent,
            });
        }
        if parent.contains(&info.basename) {
            return match entry_type {
                EntryType::Directory => Err(FsError::AlreadyExists {
                    parent: info.parent,
                    name: info.basename,
                }),
                EntryType::File => {
                    self.narrator.info(&format!(
                        "Ignore creation of the file {normalized} because an item with such a name already exists."
                    ));
                    Ok(Outcome::Unchanged)
                }
            };
        }

        self.container_mut(&info.parent)?
            .attach(Node::new(&info.basename, entry_type));

        let label = match entry_type {
            EntryType::Directory => "Directory",
            EntryType::File => "File",
        };
        self.narrator
            .info(&format!("{label} {normalized} is created."));
        Ok(Outcome::Applied)
    }

    fn remove(&mut self, path: &str) -> Result<Outcome> {
        let normalized = path::normalize(path);
        let info = PathInfo::resolve(&normalized, None);

        if info.is_root() {
            return Err(FsError::RootViolation {
                operation: "removed",
            });
        }

        let parent = self.navigate(&info.parent)?;
        if !parent.is_dir() {
            return Err(FsError::NotAContainer {
                path: normalized,
                name: info.parent,
            });
        }
        if !parent.contains(&info.basename) {
            return Err(FsError::NoSuchNode {
                path: normalized,
                parent: info.parent,
                name: info.basename,
            });
        }

        // Dropping the detached node drops its whole subtree
        self.container_mut(&info.parent)?.detach(&info.basename);
        self.narrator
            .info(&format!("The item {normalized} is removed."));
        Ok(Outcome::Applied)
    }

    /// Narrates a failure once, then hands the result back.
    pub(crate) fn report(&self, result: Result<Outcome>) -> Result<Outcome> {
        result.inspect_err(|err| self.narrator.error(&err.to_string()))
    }
}

impl Default for MapFS {
    fn default() -> Self {
        Self::new()
    }
}

impl FsBackend for MapFS {
    /// Creates a directory. Its parent must exist and the name must be free.
    fn md(&mut self, path: &str) -> Result<Outcome> {
        let result = self.create(path, EntryType::Directory);
        self.report(result)
    }

    /// Creates a file. If the name is already taken the call succeeds without changing anything.
    fn mf(&mut self, path: &str) -> Result<Outcome> {
        let result = self.create(path, EntryType::File);
        self.report(result)
    }

    /// Removes a file, or a directory with everything below it. The root cannot be removed.
    fn rm(&mut self, path: &str) -> Result<Outcome> {
        let result = self.remove(path);
        self.report(result)
    }

    fn cp(&mut self, source: &str, destination: &str) -> Result<Outcome> {
        self.transfer(source, destination, TransferMode::Copy)
    }

    fn mv(&mut self, source: &str, destination: &str) -> Result<Outcome> {
        self.transfer(source, destination, TransferMode::Move)
    }

    fn render_tree(&self) -> String {
        self.tree_view().to_string()
    }
}
