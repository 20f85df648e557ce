//! Inclusion and exclusion decisions for scanned paths
//!
//! Every filter answers one question: should this path (file or directory) be part of
//! the output? Three policies exist:
//!
//! - `GitignoreFilter`: patterns from the root `.gitignore`
//! - `PatternFilter`: user-supplied include/exclude globs
//! - the `.git` exclusion built into `CompositeFilter`
//!
//! `CompositeFilter` combines them with logical AND and is what the scanner consults.

mod composite;
mod config;
mod gitignore;
mod pattern;

use std::path::Path;

pub use composite::{CompositeFilter, VCS_DIR_NAME};
pub use config::FilterConfig;
pub use gitignore::GitignoreFilter;
pub use pattern::PatternFilter;

/// Decision function over `(path, is_dir)`.
///
/// `path` is the absolute path of the candidate; implementations evaluate it relative to
/// the root they were constructed with.
pub trait PathFilter {
    fn should_include(&self, path: &Path, is_dir: bool) -> bool;
}

/// A single filtering policy that can take part in a `CompositeFilter`.
#[derive(Debug)]
pub enum FileFilter {
    Gitignore(GitignoreFilter),
    Pattern(PatternFilter),
}

impl PathFilter for FileFilter {
    fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        match self {
            FileFilter::Gitignore(f) => f.should_include(path, is_dir),
            FileFilter::Pattern(f) => f.should_include(path, is_dir),
        }
    }
}

impl From<GitignoreFilter> for FileFilter {
    fn from(filter: GitignoreFilter) -> Self {
        FileFilter::Gitignore(filter)
    }
}

impl From<PatternFilter> for FileFilter {
    fn from(filter: PatternFilter) -> Self {
        FileFilter::Pattern(filter)
    }
}
