//! AND-composition of filters plus the unconditional `.git` exclusion

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::paths::relative_slash_path;

use super::{FileFilter, FilterConfig, GitignoreFilter, PathFilter, PatternFilter};

/// Name of the version-control metadata directory that is never scanned.
pub const VCS_DIR_NAME: &str = ".git";

/// Includes a path only if every constituent filter includes it.
#[derive(Debug)]
pub struct CompositeFilter {
    filters: Vec<FileFilter>,
    root: PathBuf,
}

impl CompositeFilter {
    pub fn new(root: &Path, filters: Vec<FileFilter>) -> Self {
        Self {
            filters,
            root: root.to_path_buf(),
        }
    }

    /// Build the filter stack for a scan of `root`.
    ///
    /// The gitignore filter is added unless disabled; the pattern filter only when some
    /// include or exclude pattern is configured.
    pub fn from_config(root: &Path, config: &FilterConfig) -> Result<Self> {
        let mut filters = Vec::new();

        if config.use_gitignore {
            filters.push(GitignoreFilter::new(root)?.into());
        }

        if config.has_patterns() {
            filters.push(
                PatternFilter::new(root, &config.include_patterns, &config.exclude_patterns)
                    .into(),
            );
        }

        log::debug!("composite filter with {} policies", filters.len());
        Ok(Self::new(root, filters))
    }

    fn is_vcs_metadata(&self, path: &Path) -> bool {
        let rel = relative_slash_path(&self.root, path)
            .unwrap_or_else(|| path.to_string_lossy().replace('\\', "/"));
        rel.split('/').any(|segment| segment == VCS_DIR_NAME)
    }
}

impl PathFilter for CompositeFilter {
    fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        if self.is_vcs_metadata(path) {
            return false;
        }
        self.filters.iter().all(|f| f.should_include(path, is_dir))
    }
}
