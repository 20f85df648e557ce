//! Treecat - combine a directory into one document: a tree followed by file contents

pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod paths;
pub mod scanner;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use filter::{
    CompositeFilter, FileFilter, FilterConfig, GitignoreFilter, PathFilter, PatternFilter,
};
pub use output::{
    ContentTransform, Formatter, OutputConfig, OutputFormat, Passthrough, TextNormalizer,
    print_json,
};
pub use scanner::{Entry, Scanner};
pub use tree::{TreeNode, build, render};
