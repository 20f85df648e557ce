//! Configuration types for filter construction

/// Which filters to build for a scan.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Honor the `.gitignore` at the scan root
    pub use_gitignore: bool,
    /// Globs a file must match to be included (empty = include all)
    pub include_patterns: Vec<String>,
    /// Globs that exclude a file or directory
    pub exclude_patterns: Vec<String>,
}

impl FilterConfig {
    pub fn has_patterns(&self) -> bool {
        !self.include_patterns.is_empty() || !self.exclude_patterns.is_empty()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            use_gitignore: true,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}
