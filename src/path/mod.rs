//! Path handling for the in-memory tree.
//!
//! Raw user paths go through [`normalize`] first and are then split by [`PathInfo::resolve`].
//! Nothing here looks at the tree: the kind reported by [`PathInfo`] is a guess made from the
//! name alone.
//!
//! The guess treats any basename containing [`FILE_MARKER`] as a file. A directory named `v1.2`
//! is therefore reported as file-shaped; callers that have the live tree at hand must trust the
//! tree over the guess.

#[cfg(test)]
mod proptests;

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// A basename containing this character is presumed to be a file.
pub const FILE_MARKER: char = '.';

/// The normalized root path.
pub const ROOT: &str = "/";

/// Turns a raw path into its canonical absolute form.
///
/// * Every segment is trimmed; empty and whitespace-only segments are dropped, so `a//b` and
///   `a/ /b` both become `/a/b`.
/// * A path without a separator is a single basename anchored at the root.
/// * A trailing separator survives as exactly one `/`.
/// * An empty input is the root.
///
/// Normalization never fails; validation happens later.
///
/// ```
/// use vfs_batch::path::normalize;
///
/// assert_eq!(normalize(" a / b "), "/a/b");
/// assert_eq!(normalize("//a// "), "/a/");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return ROOT.to_string();
    }

    let mut result = String::with_capacity(raw.len() + 1);

    if !raw.contains(SEPARATOR) {
        result.push(SEPARATOR);
        result.push_str(raw.trim());
        return result;
    }

    let mut segments = raw.split(SEPARATOR).peekable();
    while let Some(segment) = segments.next() {
        let segment = segment.trim();
        let is_last = segments.peek().is_none();

        if !segment.is_empty() {
            result.push(SEPARATOR);
            result.push_str(segment);
        } else if is_last {
            // keeps the "must be a directory" signal
            result.push(SEPARATOR);
        }
    }

    result
}

/// Iterates over the non-empty segments of a normalized path.
pub fn segments(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(SEPARATOR).filter(|s| !s.is_empty())
}

/// Checks whether `candidate` lies strictly below `ancestor`.
///
/// Both paths must be normalized and carry no trailing separator. The separator boundary is
/// respected, so `/d1` is an ancestor of `/d1/d2` but not of `/d11/d2`.
pub fn is_strict_descendant(candidate: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return candidate != ROOT;
    }
    candidate.len() > ancestor.len()
        && candidate.starts_with(ancestor)
        && candidate[ancestor.len()..].starts_with(SEPARATOR)
}

/// Joins a normalized parent path and a basename.
pub fn join(parent: &str, name: &str) -> String {
    if name.is_empty() {
        return parent.to_string();
    }
    if parent.ends_with(SEPARATOR) {
        format!("{parent}{name}")
    } else {
        format!("{parent}{SEPARATOR}{name}")
    }
}

/// Guessed type of the item a path refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
    /// A file reference that can never be valid (e.g. `/d1/f1/`).
    Invalid,
}

/// A normalized path split into its parent and basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInfo {
    /// Normalized absolute path of the containing directory, never with a trailing separator
    /// (except the root itself).
    pub parent: String,
    /// Final path component. Empty only for the root. Carries a trailing `/` when the kind is
    /// [`NodeKind::Invalid`].
    pub basename: String,
    /// Guess made from the basename, see the module docs.
    pub kind: NodeKind,
    /// Whether the normalized path ended with a separator.
    pub trailing_separator: bool,
}

impl PathInfo {
    /// Splits `normalized` into parent and basename.
    ///
    /// `required` is the kind the caller needs. Only [`NodeKind::File`] changes the outcome: a
    /// trailing separator then makes the result [`NodeKind::Invalid`].
    pub fn resolve(normalized: &str, required: Option<NodeKind>) -> PathInfo {
        if normalized.is_empty() {
            return PathInfo {
                parent: ROOT.to_string(),
                basename: String::new(),
                kind: NodeKind::Directory,
                trailing_separator: false,
            };
        }

        let trailing_separator = normalized.ends_with(SEPARATOR);
        let path = if trailing_separator {
            &normalized[..normalized.len() - SEPARATOR.len_utf8()]
        } else {
            normalized
        };

        let (parent, basename) = match path.rfind(SEPARATOR) {
            None => (ROOT, path),
            Some(0) => (ROOT, &path[1..]),
            Some(pos) => (&path[..pos], &path[pos + 1..]),
        };

        let mut basename = basename.to_string();
        let kind = if trailing_separator && required == Some(NodeKind::File) {
            basename.push(SEPARATOR);
            NodeKind::Invalid
        } else if basename.contains(FILE_MARKER) {
            NodeKind::File
        } else {
            NodeKind::Directory
        };

        PathInfo {
            parent: parent.to_string(),
            basename,
            kind,
            trailing_separator,
        }
    }

    /// Whether this is the root directory itself.
    pub fn is_root(&self) -> bool {
        self.parent == ROOT && self.basename.is_empty()
    }

    /// The full normalized path without a trailing separator.
    pub fn full_path(&self) -> String {
        join(&self.parent, &self.basename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalize {
        use super::*;

        #[test]
        fn test_empty_is_root() {
            assert_eq!(normalize(""), "/");
        }

        #[test]
        fn test_root_variants() {
            assert_eq!(normalize("/"), "/");
            assert_eq!(normalize("//"), "/");
            assert_eq!(normalize(" / "), "/");
            assert_eq!(normalize("   "), "/");
        }

        #[test]
        fn test_bare_name_is_anchored_at_root() {
            assert_eq!(normalize("dir"), "/dir");
            assert_eq!(normalize("  f.txt  "), "/f.txt");
        }

        #[test]
        fn test_duplicate_and_blank_separators_collapse() {
            assert_eq!(normalize("/d1//d2"), "/d1/d2");
            assert_eq!(normalize("/d1/   /d2"), "/d1/d2");
            assert_eq!(normalize("d1/d2"), "/d1/d2");
        }

        #[test]
        fn test_segments_are_trimmed() {
            assert_eq!(normalize(" / d1 /  d 2 "), "/d1/d 2");
        }

        #[test]
        fn test_trailing_separator_is_kept_once() {
            assert_eq!(normalize("/d1/"), "/d1/");
            assert_eq!(normalize("/d1///"), "/d1/");
            assert_eq!(normalize("/d1/  "), "/d1/");
        }
    }

    mod resolve {
        use super::*;

        #[test]
        fn test_root() {
            let info = PathInfo::resolve("/", None);
            assert!(info.is_root());
            assert_eq!(info.kind, NodeKind::Directory);

            let info = PathInfo::resolve("", Some(NodeKind::File));
            assert!(info.is_root());
        }

        #[test]
        fn test_top_level_item() {
            let info = PathInfo::resolve("/d1", None);
            assert_eq!(info.parent, "/");
            assert_eq!(info.basename, "d1");
            assert_eq!(info.kind, NodeKind::Directory);
            assert!(!info.trailing_separator);
        }

        #[test]
        fn test_nested_item() {
            let info = PathInfo::resolve("/d1/d2/f.txt", None);
            assert_eq!(info.parent, "/d1/d2");
            assert_eq!(info.basename, "f.txt");
            assert_eq!(info.kind, NodeKind::File);
            assert_eq!(info.full_path(), "/d1/d2/f.txt");
        }

        #[test]
        fn test_trailing_separator_on_directory() {
            let info = PathInfo::resolve("/d1/d2/", Some(NodeKind::Directory));
            assert_eq!(info.parent, "/d1");
            assert_eq!(info.basename, "d2");
            assert_eq!(info.kind, NodeKind::Directory);
            assert!(info.trailing_separator);
        }

        #[test]
        fn test_trailing_separator_on_required_file_is_invalid() {
            let info = PathInfo::resolve("/d1/f1/", Some(NodeKind::File));
            assert_eq!(info.kind, NodeKind::Invalid);
            assert_eq!(info.basename, "f1/");

            let info = PathInfo::resolve("/d1/f1.t/", Some(NodeKind::File));
            assert_eq!(info.kind, NodeKind::Invalid);
        }

        #[test]
        fn test_trailing_separator_unconstrained_keeps_guess() {
            let info = PathInfo::resolve("/d1/f1.t/", None);
            assert_eq!(info.kind, NodeKind::File);
            assert_eq!(info.basename, "f1.t");
        }

        #[test]
        fn test_dotted_directory_is_guessed_as_file() {
            let info = PathInfo::resolve("/v1.2", Some(NodeKind::Directory));
            assert_eq!(info.kind, NodeKind::File);
        }

        #[test]
        fn test_path_without_separator() {
            let info = PathInfo::resolve("name", None);
            assert_eq!(info.parent, "/");
            assert_eq!(info.basename, "name");
        }
    }

    mod helpers {
        use super::*;

        #[test]
        fn test_strict_descendant_respects_boundary() {
            assert!(is_strict_descendant("/d1/d2", "/d1"));
            assert!(is_strict_descendant("/d1/d2/d3", "/d1"));
            assert!(!is_strict_descendant("/d11/d2", "/d1"));
            assert!(!is_strict_descendant("/d1", "/d1"));
            assert!(!is_strict_descendant("/d", "/d1"));
        }

        #[test]
        fn test_everything_descends_from_root() {
            assert!(is_strict_descendant("/a", "/"));
            assert!(!is_strict_descendant("/", "/"));
        }

        #[test]
        fn test_join() {
            assert_eq!(join("/", "a"), "/a");
            assert_eq!(join("/a", "b"), "/a/b");
            assert_eq!(join("/a", ""), "/a");
        }

        #[test]
        fn test_segments() {
            let parts: Vec<_> = segments("/a/b/").collect();
            assert_eq!(parts, vec!["a", "b"]);
            assert_eq!(segments("/").count(), 0);
        }
    }
}
