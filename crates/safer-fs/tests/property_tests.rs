use proptest::prelude::*;
use safer_fs::{PathFilter, join_key, relative_key};
use std::path::PathBuf;

proptest! {
    #[test]
    fn test_join_key_inverts_relative_key(
        segments in prop::collection::vec("[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,11}", 1..5)
    ) {
        let base = PathBuf::from("/original");
        let key = segments.join("/");
        let native = join_key(&base, &key);
        prop_assert_eq!(relative_key(&base, &native).ok(), Some(key));
    }

    #[test]
    fn test_relative_key_joins_segments_with_slash(
        segments in prop::collection::vec("[a-zA-Z0-9_-][a-zA-Z0-9_.-]{0,11}", 1..5)
    ) {
        let root = PathBuf::from("/root-of-walk");
        let mut path = root.clone();
        for segment in &segments {
            path.push(segment);
        }
        prop_assert_eq!(relative_key(&root, &path).ok(), Some(segments.join("/")));
    }

    #[test]
    fn test_root_is_never_skipped_as_hidden(name in "\\.[a-z]{1,8}") {
        let filter = PathFilter::default();
        prop_assert!(!filter.should_skip(&name, true, true));
        prop_assert!(filter.should_skip(&name, true, false));
    }

    #[test]
    fn test_filter_is_deterministic(name in "\\PC{1,16}", is_dir: bool, is_root: bool) {
        let filter = PathFilter::default();
        prop_assert_eq!(
            filter.should_skip(&name, is_dir, is_root),
            filter.should_skip(&name, is_dir, is_root)
        );
    }
}
