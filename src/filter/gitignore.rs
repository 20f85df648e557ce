//! .gitignore-based filtering

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{Error, Result};
use crate::paths::relative_slash_path;

use super::PathFilter;

const GITIGNORE_FILE: &str = ".gitignore";

/// Filter driven by the `.gitignore` at the scan root.
///
/// Only the root ignore file is read. Without one, every path is included.
#[derive(Debug)]
pub struct GitignoreFilter {
    matcher: Option<Gitignore>,
    root: PathBuf,
}

impl GitignoreFilter {
    /// Load `<root>/.gitignore`.
    ///
    /// A missing file yields a filter that includes everything. Any other read failure
    /// is a configuration error. Invalid UTF-8 is replaced rather than rejected, and lines
    /// that fail to compile are skipped with a warning.
    pub fn new(root: &Path) -> Result<Self> {
        let ignore_path = root.join(GITIGNORE_FILE);
        let content = match fs::read(&ignore_path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no {} in {}", GITIGNORE_FILE, root.display());
                return Ok(Self {
                    matcher: None,
                    root: root.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(Error::IgnoreFile {
                    path: ignore_path,
                    source,
                });
            }
        };

        Ok(Self {
            matcher: Some(Self::build_matcher(root, &ignore_path, &content)),
            root: root.to_path_buf(),
        })
    }

    fn build_matcher(root: &Path, ignore_path: &Path, content: &str) -> Gitignore {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match builder.add_line(Some(ignore_path.to_path_buf()), line) {
                Ok(_) => pattern_count += 1,
                Err(e) => log::warn!("skipping ignore pattern {:?}: {}", line, e),
            }
        }

        log::debug!(
            "loaded {} patterns from {}",
            pattern_count,
            ignore_path.display()
        );

        builder.build().unwrap_or_else(|e| {
            log::warn!("ignoring {}: {}", ignore_path.display(), e);
            Gitignore::empty()
        })
    }

    /// Whether a `.gitignore` was found at the root.
    pub fn is_active(&self) -> bool {
        self.matcher.is_some()
    }
}

impl PathFilter for GitignoreFilter {
    fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        let Some(matcher) = &self.matcher else {
            return true;
        };

        let rel = match relative_slash_path(&self.root, path) {
            Some(rel) if !rel.is_empty() => rel,
            _ => return true,
        };

        // Parents are consulted too, so a file under an ignored directory is ignored.
        let ignored = matcher
            .matched_path_or_any_parents(Path::new(&rel), is_dir)
            .is_ignore();
        if ignored {
            log::trace!("gitignore excludes {}", rel);
        }
        !ignored
    }
}
