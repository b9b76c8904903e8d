use crate::config::ExtensionSet;
use crate::filter::PathFilter;
use crate::gather::{has_allowed_suffix, is_regular_file, walk_project};
use log;
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub name: String,
    pub node_type: NodeType,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::Directory,
            children: Vec::new(),
        }
    }

    fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_type: NodeType::File,
            children: Vec::new(),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.node_type == NodeType::Directory
    }
}

/// Builds the filtered directory tree rooted at `root` (named `.`).
///
/// Uses the same walk as file collection, so pruning, link handling and
/// sibling order agree. Directories are kept regardless of suffix; files
/// need an allowed suffix. An unlistable directory appears with no children.
pub fn build_tree(root: &Path, filter: &PathFilter, extensions: &ExtensionSet) -> TreeNode {
    log::debug!("Building tree structure for {}", root.display());
    let mut tree = TreeNode::directory(".");
    // open[i] is the directory currently being filled at depth i + 1.
    let mut open: Vec<TreeNode> = Vec::new();

    for entry in walk_project(root, filter) {
        let depth = entry.depth();
        if depth == 0 {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let node = if entry.file_type().is_dir() {
            TreeNode::directory(name)
        } else if is_regular_file(&entry) && has_allowed_suffix(entry.path(), extensions) {
            TreeNode::file(name)
        } else {
            log::trace!("Left out of tree: {}", entry.path().display());
            continue;
        };

        close_directories(&mut tree, &mut open, depth - 1);
        if node.is_dir() {
            open.push(node);
        } else {
            match open.last_mut() {
                Some(parent) => parent.children.push(node),
                None => tree.children.push(node),
            }
        }
    }

    close_directories(&mut tree, &mut open, 0);
    tree
}

/// Attaches finished directories to their parents until `keep` stay open.
fn close_directories(tree: &mut TreeNode, open: &mut Vec<TreeNode>, keep: usize) {
    while open.len() > keep {
        let Some(done) = open.pop() else { break };
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => tree.children.push(done),
        }
    }
}

/// Renders a tree with box-drawing connectors. Directories get a trailing `/`.
pub fn render_tree(tree: &TreeNode) -> String {
    let mut lines = vec![tree.name.clone()];
    render_children(&tree.children, "", &mut lines);
    lines.join("\n")
}

fn render_children(children: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (idx, child) in children.iter().enumerate() {
        let is_last = idx + 1 == children.len();
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let suffix = if child.is_dir() { "/" } else { "" };
        lines.push(format!("{}{}{}{}", prefix, connector, child.name, suffix));

        if child.is_dir() {
            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { CONTINUATION });
            render_children(&child.children, &child_prefix, lines);
        }
    }
}

/// Builds and renders the tree in one step.
pub fn render(root: &Path, filter: &PathFilter, extensions: &ExtensionSet) -> String {
    render_tree(&build_tree(root, filter, extensions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnoreSet;
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_nested_layout_with_connectors() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("go.mod"), "");
        write_file(&root.join("main.go"), "");
        write_file(&root.join("cmd/app/main.go"), "");
        write_file(&root.join("internal/service.go"), "");
        write_file(&root.join("internal/Alpha.go"), "");

        let filter = PathFilter::new(IgnoreSet::new(), false, BTreeSet::new());
        let rendered = render(root, &filter, &set(&[".go", ".mod"]));

        let expected = [
            ".",
            "├── cmd/",
            "│   └── app/",
            "│       └── main.go",
            "├── internal/",
            "│   ├── Alpha.go",
            "│   └── service.go",
            "├── go.mod",
            "└── main.go",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[test]
    fn excludes_ignored_paths_and_foreign_suffixes_but_keeps_dirs() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("vendor/lib.go"), "");
        write_file(&root.join("docs/notes.txt"), "");
        write_file(&root.join("main.go"), "");
        write_file(&root.join("Makefile"), "");

        let filter = PathFilter::new(set(&["vendor"]), false, BTreeSet::new());
        let rendered = render(root, &filter, &set(&[".go"]));

        assert!(!rendered.contains("vendor"));
        assert!(!rendered.contains("notes.txt"));
        assert!(!rendered.contains("Makefile"));
        assert!(rendered.contains("docs/"));
        assert!(rendered.contains("main.go"));
    }

    #[test]
    fn empty_root_renders_single_dot() {
        let temp = tempdir().unwrap();
        let filter = PathFilter::new(IgnoreSet::new(), false, BTreeSet::new());
        assert_eq!(render(temp.path(), &filter, &set(&[".go"])), ".");
    }

    #[test]
    fn directories_sort_before_files_case_insensitively() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("b.go"), "");
        write_file(&root.join("A.go"), "");
        write_file(&root.join("zeta/x.go"), "");
        write_file(&root.join("Beta/y.go"), "");

        let filter = PathFilter::new(IgnoreSet::new(), false, BTreeSet::new());
        let tree = build_tree(root, &filter, &set(&[".go"]));
        let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "zeta", "A.go", "b.go"]);
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_skips_only_its_subtree() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("main.go"), "");
        write_file(&root.join("locked/secret.go"), "");
        write_file(&root.join("open/visible.go"), "");
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory; nothing to check then.
        let still_listable = fs::read_dir(&locked).is_ok();
        let filter = PathFilter::new(IgnoreSet::new(), false, BTreeSet::new());
        let rendered = render(root, &filter, &set(&[".go"]));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if still_listable {
            return;
        }
        let expected = [
            ".",
            "├── locked/",
            "├── open/",
            "│   └── visible.go",
            "└── main.go",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }

    #[cfg(unix)]
    #[test]
    fn links_render_like_collection_sees_them() {
        use std::os::unix::fs::symlink;

        let temp = tempdir().unwrap();
        let root = temp.path();
        write_file(&root.join("real.go"), "");
        write_file(&root.join("internal/service.go"), "");
        symlink(root.join("real.go"), root.join("link.go")).unwrap();
        symlink(root.join("internal"), root.join("mirror")).unwrap();
        symlink(root.join("missing.go"), root.join("dangling.go")).unwrap();

        let filter = PathFilter::new(IgnoreSet::new(), false, BTreeSet::new());
        let rendered = render(root, &filter, &set(&[".go"]));
        let expected = [
            ".",
            "├── internal/",
            "│   └── service.go",
            "├── link.go",
            "└── real.go",
        ]
        .join("\n");
        assert_eq!(rendered, expected);
    }
}
