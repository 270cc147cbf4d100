//! Property-based tests for the rename engine
//!
//! These tests verify:
//! - The name transform replaces every occurrence or leaves the name alone
//! - Preview and execute agree on the rename pairs for the same tree
//! - Non-matching entries survive execute untouched

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use filetools::{RenameEngine, RenameReport, RenameRequest, replace_name};
use proptest::prelude::*;
use tempfile::TempDir;

fn build_tree(names: &BTreeSet<String>) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in names {
        fs::write(dir.path().join(name), name.as_bytes()).unwrap();
    }
    dir
}

fn relative_pairs(report: &RenameReport, root: &Path) -> Vec<(PathBuf, PathBuf)> {
    report
        .plans()
        .map(|p| {
            (
                p.original_path.strip_prefix(root).unwrap().to_path_buf(),
                p.target_path.strip_prefix(root).unwrap().to_path_buf(),
            )
        })
        .collect()
}

proptest! {
    /// The transform matches a plain replace-all whenever the name contains the match
    #[test]
    fn transform_is_replace_all(
        name in "[a-c_]{0,12}",
        needle in "[a-c]{1,3}",
        replacement in "[x-z]{0,3}",
    ) {
        match replace_name(&name, &needle, &replacement) {
            Some(new_name) => {
                prop_assert!(name.contains(&needle));
                prop_assert_eq!(new_name, name.replace(&needle, &replacement));
            }
            None => prop_assert!(!name.contains(&needle)),
        }
    }

    /// A non-empty replacement free of the match leaves no occurrence behind
    #[test]
    fn transform_removes_every_occurrence(
        name in "[a-c]{1,12}",
        needle in "[a-c]{1,2}",
        replacement in "[x-z]{1,3}",
    ) {
        if let Some(new_name) = replace_name(&name, &needle, &replacement) {
            prop_assert!(!new_name.contains(&needle));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Preview predicts exactly the pairs execute acts on
    #[test]
    fn preview_agrees_with_execute(
        names in prop::collection::btree_set("[a-c]{1,5}", 1..8),
        replacement in "[x-z]{0,2}",
    ) {
        let preview_root = build_tree(&names);
        let execute_root = build_tree(&names);

        let preview = RenameEngine::new(
            RenameRequest::new(preview_root.path(), "ab", replacement.clone()).unwrap(),
        )
        .preview()
        .unwrap();
        let execute = RenameEngine::new(
            RenameRequest::new(execute_root.path(), "ab", replacement).unwrap(),
        )
        .execute()
        .unwrap();

        prop_assert_eq!(
            relative_pairs(&preview, preview_root.path()),
            relative_pairs(&execute, execute_root.path())
        );
        prop_assert_eq!(
            preview.plans().count(),
            names.iter().filter(|n| n.contains("ab")).count()
        );
    }

    /// Entries without the match keep their names
    #[test]
    fn non_matching_entries_untouched(
        names in prop::collection::btree_set("[a-c]{1,5}", 1..8),
    ) {
        let root = build_tree(&names);

        RenameEngine::new(RenameRequest::new(root.path(), "ab", "zz").unwrap())
            .execute()
            .unwrap();

        for name in names.iter().filter(|n| !n.contains("ab")) {
            prop_assert!(root.path().join(name).exists(), "{} disappeared", name);
        }
    }
}
