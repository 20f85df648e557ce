//! Tree construction, ordering and pruning

use std::cmp::Ordering;

use serde::Serialize;

use crate::scanner::Entry;

/// One node of the directory tree.
///
/// The root produced by `build` is synthetic: empty name, empty path, always a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    /// Slash-joined path from the root
    pub path: String,
    pub is_dir: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn root() -> Self {
        Self::dir("", "")
    }

    pub fn dir(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: true,
            children: Vec::new(),
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Index of the child named `name`, inserting a new node if there is none.
    fn child_index(&mut self, name: &str, path: &str, is_dir: bool) -> usize {
        // Entries arrive sorted, so a repeated parent is almost always the newest child.
        if let Some(index) = self.children.iter().rposition(|c| c.name == name) {
            return index;
        }
        self.children.push(Self {
            name: name.to_string(),
            path: path.to_string(),
            is_dir,
            children: Vec::new(),
        });
        self.children.len() - 1
    }

    fn insert(&mut self, rel_path: &str, is_dir: bool) {
        let parts: Vec<&str> = rel_path.split('/').filter(|p| !p.is_empty()).collect();
        let mut current = self;

        for (i, part) in parts.iter().enumerate() {
            let is_last = i == parts.len() - 1;
            let path = parts[..=i].join("/");
            let index = current.child_index(part, &path, !is_last || is_dir);
            current = &mut current.children[index];
            if !is_last {
                current.is_dir = true;
            }
        }
    }
}

/// Build a sorted, pruned tree from entries sorted by relative path.
pub fn build(entries: &[Entry]) -> TreeNode {
    let mut root = TreeNode::root();

    for entry in entries {
        let rel_path = entry.rel_path();
        if rel_path.is_empty() || rel_path == "." {
            continue;
        }
        root.insert(rel_path, entry.is_dir());
    }

    sort_children(&mut root);
    prune_empty_dirs(&mut root);
    root
}

/// Sort children recursively: directories before files, then by name (byte order).
pub fn sort_children(node: &mut TreeNode) {
    node.children.sort_by(|a, b| match (a.is_dir, b.is_dir) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.cmp(&b.name),
    });

    for child in node.children.iter_mut().filter(|c| c.is_dir) {
        sort_children(child);
    }
}

/// Whether a node is a file or has a file somewhere below it.
pub fn has_descendant_files(node: &TreeNode) -> bool {
    !node.is_dir || node.children.iter().any(has_descendant_files)
}

/// Remove directories with no descendant files, bottom-up.
///
/// Files are always kept and surviving siblings keep their order.
pub fn prune_empty_dirs(node: &mut TreeNode) {
    node.children.retain_mut(|child| {
        if !child.is_dir {
            return true;
        }
        prune_empty_dirs(child);
        // After pruning, every remaining child is a file or holds one.
        !child.children.is_empty()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::render;

    fn entry(rel_path: &str, is_dir: bool) -> Entry {
        Entry::new(format!("/root/{}", rel_path), rel_path, is_dir, 0)
    }

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    fn find<'a>(node: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
        if node.path == path {
            return Some(node);
        }
        node.children.iter().find_map(|c| find(c, path))
    }

    #[test]
    fn test_build_empty() {
        let root = build(&[]);
        assert!(root.is_root());
        assert!(root.is_dir);
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_build_single_file() {
        let root = build(&[entry("file.txt", false)]);

        assert_eq!(root.children.len(), 1);
        let file = &root.children[0];
        assert_eq!(file.name, "file.txt");
        assert_eq!(file.path, "file.txt");
        assert!(!file.is_dir);
    }

    #[test]
    fn test_build_nested_structure() {
        let root = build(&[
            entry("dir1", true),
            entry("dir1/file1.txt", false),
            entry("dir1/subdir", true),
            entry("dir1/subdir/file2.txt", false),
            entry("root.txt", false),
        ]);

        assert_eq!(names(&root), vec!["dir1", "root.txt"]);
        let dir1 = &root.children[0];
        assert!(dir1.is_dir);
        assert_eq!(names(dir1), vec!["subdir", "file1.txt"]);
        assert_eq!(dir1.children[0].path, "dir1/subdir");
        assert_eq!(dir1.children[0].children[0].path, "dir1/subdir/file2.txt");
    }

    #[test]
    fn test_build_creates_missing_intermediate_dirs() {
        let root = build(&[entry("a/b/c.txt", false)]);

        let a = find(&root, "a").unwrap();
        let b = find(&root, "a/b").unwrap();
        assert!(a.is_dir);
        assert!(b.is_dir);
        assert!(!find(&root, "a/b/c.txt").unwrap().is_dir);
    }

    #[test]
    fn test_build_no_duplicate_siblings() {
        let root = build(&[
            entry("src", true),
            entry("src/a.rs", false),
            entry("src/b.rs", false),
        ]);

        assert_eq!(names(&root), vec!["src"]);
        assert_eq!(names(&root.children[0]), vec!["a.rs", "b.rs"]);
    }

    #[test]
    fn test_ancestor_chain_present_as_directories() {
        let entries = vec![
            entry("a", true),
            entry("a/b", true),
            entry("a/b/c.txt", false),
            entry("x/y/z.txt", false),
        ];
        let root = build(&entries);

        for e in &entries {
            let parts: Vec<&str> = e.rel_path().split('/').collect();
            for i in 1..parts.len() {
                let ancestor = parts[..i].join("/");
                let node = find(&root, &ancestor).expect("ancestor missing");
                assert!(node.is_dir, "{} should be a directory", ancestor);
            }
        }
    }

    #[test]
    fn test_sort_directories_first_then_bytewise() {
        let root = build(&[
            entry("B.txt", false),
            entry("a.txt", false),
            entry("zdir", true),
            entry("zdir/f", false),
            entry("Adir", true),
            entry("Adir/f", false),
        ]);

        // Uppercase sorts before lowercase in byte order.
        assert_eq!(names(&root), vec!["Adir", "zdir", "B.txt", "a.txt"]);
    }

    #[test]
    fn test_prune_leaf_directory() {
        let root = build(&[entry("empty", true), entry("file.txt", false)]);
        assert_eq!(names(&root), vec!["file.txt"]);
    }

    #[test]
    fn test_prune_intermediate_empty() {
        let root = build(&[
            entry("a", true),
            entry("a/b", true),
            entry("a/b/c", true),
            entry("x", true),
            entry("x/keep.txt", false),
        ]);

        assert_eq!(names(&root), vec!["x"]);
    }

    #[test]
    fn test_prune_mixed_structure() {
        let root = build(&[
            entry("docs", true),
            entry("docs/drafts", true),
            entry("src", true),
            entry("src/empty", true),
            entry("src/main.go", false),
        ]);

        assert_eq!(names(&root), vec!["src"]);
        assert_eq!(names(&root.children[0]), vec!["main.go"]);
    }

    #[test]
    fn test_prune_all_empty() {
        let root = build(&[entry("a", true), entry("a/b", true), entry("c", true)]);
        assert!(root.children.is_empty());
        assert_eq!(render(&root), "");
    }

    #[test]
    fn test_prune_only_files_untouched() {
        let root = build(&[entry("a.txt", false), entry("b.txt", false)]);
        assert_eq!(names(&root), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut tree = TreeNode::root().with_children(vec![
            TreeNode::dir("a", "a").with_children(vec![
                TreeNode::dir("b", "a/b"),
                TreeNode::file("f.txt", "a/f.txt"),
            ]),
            TreeNode::dir("c", "c").with_children(vec![TreeNode::dir("d", "c/d")]),
            TreeNode::file("g.txt", "g.txt"),
        ]);

        prune_empty_dirs(&mut tree);
        let once = tree.clone();
        prune_empty_dirs(&mut tree);

        assert_eq!(tree, once);
        assert_eq!(names(&tree), vec!["a", "g.txt"]);
        assert_eq!(names(&tree.children[0]), vec!["f.txt"]);
    }

    #[test]
    fn test_directory_survives_iff_it_has_file_descendants() {
        let tree = TreeNode::root().with_children(vec![
            TreeNode::dir("full", "full").with_children(vec![
                TreeNode::dir("deep", "full/deep")
                    .with_children(vec![TreeNode::file("x", "full/deep/x")]),
            ]),
            TreeNode::dir("hollow", "hollow")
                .with_children(vec![TreeNode::dir("inner", "hollow/inner")]),
        ]);

        let expected: Vec<bool> = tree.children.iter().map(has_descendant_files).collect();
        let mut pruned = tree.clone();
        prune_empty_dirs(&mut pruned);

        assert_eq!(expected, vec![true, false]);
        assert_eq!(names(&pruned), vec!["full"]);
    }

    #[test]
    fn test_prune_preserves_sibling_order() {
        let mut tree = TreeNode::root().with_children(vec![
            TreeNode::file("z", "z"),
            TreeNode::dir("empty", "empty"),
            TreeNode::file("a", "a"),
        ]);

        prune_empty_dirs(&mut tree);
        assert_eq!(names(&tree), vec!["z", "a"]);
    }

    #[test]
    fn test_skips_empty_and_dot_paths() {
        let root = build(&[entry("", true), entry(".", true), entry("f", false)]);
        assert_eq!(names(&root), vec!["f"]);
    }
}
