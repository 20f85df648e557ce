//! Document assembly
//!
//! This module writes the final context document from a rendered tree and the scanner's
//! entry list:
//!
//! - `config` - Output configuration types
//! - `transform` - Per-file byte transforms (encoding, BOM, line endings)
//! - `json` - JSON output
//!
//! The text format is the tree, one blank line, then every file as a
//! `=== <relative path> ===` line followed by its content and one newline.

mod config;
mod json;
mod transform;

use std::fs;
use std::io::Write;

use crate::error::{Error, Result};
use crate::scanner::Entry;
use crate::tree::{TreeNode, render};

pub use config::{OutputConfig, OutputFormat};
pub use json::print_json;
pub use transform::{ContentTransform, Passthrough, TextNormalizer};

/// Writes the text document to any `Write` sink.
pub struct Formatter<W: Write> {
    writer: W,
    transform: Box<dyn ContentTransform>,
}

impl<W: Write> Formatter<W> {
    /// Formatter using a `TextNormalizer` with no encodings configured.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            transform: Box::new(TextNormalizer::default()),
        }
    }

    pub fn with_transform(mut self, transform: impl ContentTransform + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    /// Write the tree section, the separator and every file's content.
    ///
    /// Stops at the first unreadable file; nothing after it is written.
    pub fn format(&mut self, tree: &TreeNode, entries: &[Entry]) -> Result<()> {
        self.writer.write_all(render(tree).as_bytes())?;
        self.writer.write_all(b"\n")?;

        for entry in entries.iter().filter(|e| !e.is_dir()) {
            writeln!(self.writer, "=== {} ===", entry.rel_path())?;
            let content = read_content(entry, self.transform.as_ref())?;
            self.writer.write_all(&content)?;
            self.writer.write_all(b"\n")?;
        }

        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Read a file entry's bytes and run them through `transform`.
pub fn read_content(entry: &Entry, transform: &dyn ContentTransform) -> Result<Vec<u8>> {
    let raw = fs::read(entry.path()).map_err(|source| Error::FileRead {
        path: entry.path().to_path_buf(),
        source,
    })?;
    log::trace!("read {} ({} bytes)", entry.rel_path(), raw.len());
    transform.transform(entry.path(), raw)
}
