//! Include/exclude glob filtering

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

use crate::paths::relative_slash_path;

use super::PathFilter;

/// Filter driven by user-supplied glob patterns.
///
/// Patterns are matched against the root-relative path with `/` separators. `*` stays
/// within one path segment, `**` spans any number of segments.
#[derive(Debug)]
pub struct PatternFilter {
    include: GlobSet,
    exclude: GlobSet,
    has_includes: bool,
    root: PathBuf,
}

impl PatternFilter {
    pub fn new(root: &Path, include_patterns: &[String], exclude_patterns: &[String]) -> Self {
        Self {
            include: build_glob_set(include_patterns),
            exclude: build_glob_set(exclude_patterns),
            has_includes: !include_patterns.is_empty(),
            root: root.to_path_buf(),
        }
    }
}

impl PathFilter for PatternFilter {
    fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        let Some(rel) = relative_slash_path(&self.root, path) else {
            return true;
        };

        if self.exclude.is_match(&rel) {
            log::trace!("exclude pattern matches {}", rel);
            return false;
        }

        if self.has_includes {
            // Directories stay in until pruning can tell whether anything below matched.
            if is_dir {
                return true;
            }
            let included = self.include.is_match(&rel);
            if !included {
                log::trace!("no include pattern matches {}", rel);
            }
            return included;
        }

        true
    }
}

/// Compile patterns into a set. A pattern that fails to compile never matches.
fn build_glob_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        match GlobBuilder::new(pattern).literal_separator(true).build() {
            Ok(glob) => {
                log::trace!("adding glob pattern {:?}", pattern);
                builder.add(glob);
            }
            Err(e) => log::warn!("invalid glob pattern {:?}: {}", pattern, e),
        }
    }
    builder.build().unwrap_or_else(|e| {
        log::warn!("error building glob set: {}", e);
        GlobSet::empty()
    })
}
