//! Property-based tests for path normalization and splitting.

use super::{NodeKind, PathInfo, ROOT, normalize};
use proptest::prelude::*;

// Segments with optional padding, to exercise trimming
fn raw_segment_strategy() -> impl Strategy<Value = String> {
    ("[ ]{0,2}", "[a-z0-9_.]{0,8}", "[ ]{0,2}").prop_map(|(l, s, r)| format!("{l}{s}{r}"))
}

fn raw_path_strategy() -> impl Strategy<Value = String> {
    (
        any::<bool>(),
        prop::collection::vec(raw_segment_strategy(), 0..6),
        any::<bool>(),
    )
        .prop_map(|(leading, parts, trailing)| {
            let mut path = String::new();
            if leading {
                path.push('/');
            }
            path.push_str(&parts.join("/"));
            if trailing {
                path.push('/');
            }
            path
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // normalize(normalize(p)) == normalize(p)
    #[test]
    fn normalization_idempotent(path in raw_path_strategy()) {
        let once = normalize(&path);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    // Normalized paths are absolute and never contain empty or padded segments
    #[test]
    fn normalized_paths_are_clean(path in raw_path_strategy()) {
        let normalized = normalize(&path);
        prop_assert!(normalized.starts_with('/'));
        prop_assert!(!normalized.contains("//"));
        for segment in normalized.split('/').filter(|s| !s.is_empty()) {
            prop_assert_eq!(segment, segment.trim());
        }
    }

    // Joining the parts back yields the path without its trailing separator
    #[test]
    fn resolve_splits_losslessly(path in raw_path_strategy()) {
        let normalized = normalize(&path);
        let info = PathInfo::resolve(&normalized, None);
        let expected = if normalized == ROOT {
            ROOT.to_string()
        } else {
            normalized.trim_end_matches('/').to_string()
        };
        prop_assert_eq!(info.full_path(), expected);
    }

    // A required file can never be referenced with a trailing separator
    #[test]
    fn trailing_separator_never_names_a_file(path in raw_path_strategy()) {
        let normalized = normalize(&path);
        let info = PathInfo::resolve(&normalized, Some(NodeKind::File));
        if normalized.ends_with('/') {
            prop_assert_eq!(info.kind, NodeKind::Invalid);
        } else {
            prop_assert_ne!(info.kind, NodeKind::Invalid);
        }
    }
}
