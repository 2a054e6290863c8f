use std::collections::BTreeMap;

use crate::path::ROOT;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

impl EntryType {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "directory",
        }
    }
}

/// One item of the tree.
///
/// A node exclusively owns its children, keyed by basename, so names are unique within a
/// directory. Files never have children. Cloning a node clones the whole subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    entry_type: EntryType,
    children: BTreeMap<String, Node>,
}

impl Node {
    pub(crate) fn new(name: &str, entry_type: EntryType) -> Node {
        Node {
            name: name.to_string(),
            entry_type,
            children: BTreeMap::new(),
        }
    }

    pub(crate) fn root() -> Node {
        Node::new(ROOT, EntryType::Directory)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }

    /// Children in ascending name order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Whether `other` has the same shape: same container/leaf pattern and same names below the
    /// top node. The top-level names themselves are not compared.
    pub fn same_shape(&self, other: &Node) -> bool {
        self.entry_type == other.entry_type
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(other.children.iter())
                .all(|((a_name, a), (b_name, b))| a_name == b_name && a.same_shape(b))
    }

    /// Number of nodes in this subtree, this node included.
    pub fn count(&self) -> usize {
        1 + self.children.values().map(Node::count).sum::<usize>()
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    /// Attaches `node` under its own name. The caller guarantees the name is free.
    pub(crate) fn attach(&mut self, node: Node) {
        debug_assert!(self.is_dir(), "files never own children");
        self.children.insert(node.name.clone(), node);
    }

    pub(crate) fn detach(&mut self, name: &str) -> Option<Node> {
        self.children.remove(name)
    }

    /// Deep copy of this subtree with a new top-level name.
    pub(crate) fn copy_as(&self, name: &str) -> Node {
        let mut copy = self.clone();
        copy.name = name.to_string();
        copy
    }

    pub(crate) fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}
