//! Hierarchical view of scanned entries
//!
//! `build` turns the scanner's flat, sorted entry list into an owned tree, orders
//! siblings (directories first, then by name) and prunes directories that ended up with
//! no files below them. `render` draws the result with box-drawing connectors.

mod node;
mod render;

pub use node::{TreeNode, build, has_descendant_files, prune_empty_dirs, sort_children};
pub use render::render;
