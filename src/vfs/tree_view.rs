use std::fmt;

use super::entry::Node;

/// Renders a subtree, one line per node, children in ascending name order.
///
/// ```text
/// /  [D]
/// |_a  [D]
/// | |_f.txt  [F]
/// |_b  [D]
/// ```
pub struct TreeView<'a> {
    root: &'a Node,
}

impl<'a> TreeView<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { root }
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.root, "")
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, prefix: &str) -> fmt::Result {
    let marker = if node.is_dir() { "[D]" } else { "[F]" };

    let next_prefix = if prefix.is_empty() {
        writeln!(f, "{}  {marker}", node.name())?;
        "|".to_string()
    } else {
        writeln!(f, "{prefix}_{}  {marker}", node.name())?;
        format!("{prefix} |")
    };

    for child in node.children() {
        write_node(f, child, &next_prefix)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::core::{FsBackend, RecordingNarrator};
    use crate::vfs::MapFS;

    #[test]
    fn test_empty_tree() {
        let fs = MapFS::with_narrator(RecordingNarrator::new());
        assert_eq!(fs.tree_view().to_string(), "/  [D]\n");
    }

    #[test]
    fn test_nested_tree_sorted() {
        let mut fs = MapFS::with_narrator(RecordingNarrator::new());
        fs.md("/b").unwrap();
        fs.md("/a").unwrap();
        fs.mf("/a/f.txt").unwrap();
        fs.md("/a/c").unwrap();
        fs.mf("/a/c/g.txt").unwrap();

        let expected = "\
/  [D]
|_a  [D]
| |_c  [D]
| | |_g.txt  [F]
| |_f.txt  [F]
|_b  [D]
";
        assert_eq!(fs.tree_view().to_string(), expected);
        assert_eq!(fs.render_tree(), expected);
    }
}
