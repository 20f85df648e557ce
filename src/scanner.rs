//! Directory scanning: a filtered, sorted flat list of entries under one root

use std::fmt;
use std::fs::{self, DirEntry, FileType};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::filter::PathFilter;
use crate::paths::relative_slash_path;

/// One filesystem node that survived filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    path: PathBuf,
    rel_path: String,
    is_dir: bool,
    size: u64,
}

impl Entry {
    /// Entries normally come from `Scanner::scan`; this exists for callers that build
    /// entry lists by hand.
    pub fn new(path: impl Into<PathBuf>, rel_path: impl Into<String>, is_dir: bool, size: u64) -> Self {
        Self {
            path: path.into(),
            rel_path: rel_path.into(),
            is_dir,
            size,
        }
    }

    /// Absolute path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to the scan root, always `/`-separated.
    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Depth-first scanner over a single root directory.
pub struct Scanner {
    root: PathBuf,
    filter: Option<Box<dyn PathFilter>>,
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("root", &self.root)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}

impl Scanner {
    /// Resolve `root` to an absolute path and check that it is a directory.
    pub fn new(root: &Path) -> Result<Self> {
        let root = std::path::absolute(root).map_err(|source| Error::RootAccess {
            path: root.to_path_buf(),
            source,
        })?;

        let metadata = match fs::metadata(&root) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Error::NotFound(root)),
            Err(source) => return Err(Error::RootAccess { path: root, source }),
        };
        if !metadata.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        Ok(Self { root, filter: None })
    }

    /// Consult `filter` for every child; rejected directories are not descended.
    pub fn with_filter(mut self, filter: impl PathFilter + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the root and return every included entry, sorted by relative path.
    ///
    /// The first I/O error aborts the scan. Relative paths are unique: names that only
    /// differ in bytes lost to UTF-8 replacement keep the first entry in listing order.
    pub fn scan(&self) -> Result<Vec<Entry>> {
        log::debug!("scanning {}", self.root.display());

        let mut entries = Vec::new();
        self.walk_dir(&self.root, &mut entries)?;
        entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        entries.dedup_by(|later, kept| {
            let duplicate = later.rel_path == kept.rel_path;
            if duplicate {
                log::warn!(
                    "skipping {}: name collides with {} once made valid UTF-8",
                    later.path.display(),
                    kept.path.display()
                );
            }
            duplicate
        });

        log::debug!("scan found {} entries", entries.len());
        Ok(entries)
    }

    fn walk_dir(&self, dir: &Path, entries: &mut Vec<Entry>) -> Result<()> {
        // The listing is fully read and its handle closed before descending.
        let mut children = fs::read_dir(dir)
            .and_then(|listing| listing.collect::<io::Result<Vec<_>>>())
            .map_err(|source| Error::Traversal {
                path: dir.to_path_buf(),
                source,
            })?;
        children.sort_by_key(|c| c.file_name());

        for child in children {
            let path = child.path();
            let file_type = child.file_type().map_err(|source| Error::Traversal {
                path: path.clone(),
                source,
            })?;
            if child.file_name().to_str().is_none() {
                log::warn!("non-UTF-8 name {} shown lossily", path.display());
            }

            let kind = match inspect(&child, file_type) {
                Ok(kind) => kind,
                // A dangling link is only an error if it would have been listed.
                Err(_) if file_type.is_symlink() && !self.should_include(&path, false) => {
                    log::trace!("skipping excluded dangling symlink {}", path.display());
                    continue;
                }
                Err(source) => return Err(Error::Traversal { path, source }),
            };

            if !self.should_include(&path, kind.is_dir) {
                if kind.is_dir {
                    log::trace!("skipping directory {}", path.display());
                }
                continue;
            }

            let rel_path = relative_slash_path(&self.root, &path).unwrap_or_default();
            entries.push(Entry {
                path: path.clone(),
                rel_path,
                is_dir: kind.is_dir,
                size: kind.size,
            });

            // Symlinked directories are listed but not followed, so cycles cannot occur.
            if kind.is_dir && !kind.is_symlink {
                self.walk_dir(&path, entries)?;
            }
        }

        Ok(())
    }

    fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|f| f.should_include(path, is_dir))
    }
}

struct NodeKind {
    is_dir: bool,
    is_symlink: bool,
    size: u64,
}

/// Determine the kind and size of a directory child, resolving symlinks.
fn inspect(child: &DirEntry, file_type: FileType) -> io::Result<NodeKind> {
    let is_symlink = file_type.is_symlink();
    let metadata = if is_symlink {
        fs::metadata(child.path())?
    } else {
        child.metadata()?
    };

    Ok(NodeKind {
        is_dir: metadata.is_dir(),
        is_symlink,
        size: if metadata.is_dir() { 0 } else { metadata.len() },
    })
}
