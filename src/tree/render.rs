//! Box-drawing rendering of a `TreeNode`

use super::node::TreeNode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

/// Render the tree, one line per node. The synthetic root has no line of its own.
pub fn render(root: &TreeNode) -> String {
    let mut output = String::new();
    if root.is_root() {
        render_children(root, "", &mut output);
    } else {
        render_node(root, "", true, &mut output);
    }
    output
}

fn render_children(node: &TreeNode, prefix: &str, output: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, prefix, i == count - 1, output);
    }
}

fn render_node(node: &TreeNode, prefix: &str, is_last: bool, output: &mut String) {
    output.push_str(prefix);
    output.push_str(if is_last { LAST_BRANCH } else { BRANCH });
    output.push_str(&node.name);
    if node.is_dir {
        output.push('/');
    }
    output.push('\n');

    if !node.children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { VERTICAL });
        render_children(node, &child_prefix, output);
    }
}
