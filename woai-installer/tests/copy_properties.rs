//! Property tests for recursive tree copies.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tempfile::TempDir;
use woai_installer::merge::copy_tree;

/// Relative file path -> contents for every regular file under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let relative = path.strip_prefix(root).unwrap().to_path_buf();
                files.insert(relative, fs::read(&path).unwrap());
            }
        }
    }
    files
}

fn tree_strategy() -> impl Strategy<Value = BTreeMap<PathBuf, Vec<u8>>> {
    let segment = "[a-z]{1,6}";
    let path = prop::collection::vec(segment, 1..4).prop_map(|parts| {
        let mut path = PathBuf::new();
        for (i, part) in parts.iter().enumerate() {
            // Directories and files live in separate namespaces so a file
            // never shadows a directory of the same name.
            if i + 1 == parts.len() {
                path.push(format!("{}.dat", part));
            } else {
                path.push(part);
            }
        }
        path
    });
    prop::collection::btree_map(path, prop::collection::vec(any::<u8>(), 0..64), 0..12)
}

fn materialize(root: &Path, tree: &BTreeMap<PathBuf, Vec<u8>>) {
    fs::create_dir_all(root).unwrap();
    for (relative, contents) in tree {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_copy_reproduces_tree(tree in tree_strategy()) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        let dest = temp.path().join("dest");
        materialize(&source, &tree);

        let stats = copy_tree(&source, &dest).unwrap();

        prop_assert_eq!(snapshot(&dest), tree.clone());
        prop_assert_eq!(stats.files, tree.len());
    }

    #[test]
    fn prop_copy_is_idempotent(tree in tree_strategy()) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        let dest = temp.path().join("dest");
        materialize(&source, &tree);

        copy_tree(&source, &dest).unwrap();
        let first = snapshot(&dest);
        copy_tree(&source, &dest).unwrap();

        prop_assert_eq!(snapshot(&dest), first);
    }

    #[test]
    fn prop_later_copy_wins(first in tree_strategy(), second in tree_strategy()) {
        let temp = TempDir::new().unwrap();
        let source_a = temp.path().join("a");
        let source_b = temp.path().join("b");
        let dest = temp.path().join("dest");
        materialize(&source_a, &first);
        materialize(&source_b, &second);

        copy_tree(&source_a, &dest).unwrap();
        copy_tree(&source_b, &dest).unwrap();

        let mut expected = first.clone();
        expected.extend(second.clone());
        prop_assert_eq!(snapshot(&dest), expected);
    }
}
