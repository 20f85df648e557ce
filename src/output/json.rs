//! JSON output formatting

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::scanner::Entry;
use crate::tree::TreeNode;

use super::{ContentTransform, read_content};

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    tree: &'a TreeNode,
    files: Vec<JsonFile<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    size: u64,
    content: String,
}

/// Write the tree and every file's transformed content as pretty-printed JSON.
///
/// Content that is not valid UTF-8 is converted lossily.
pub fn print_json<W: Write>(
    writer: &mut W,
    tree: &TreeNode,
    entries: &[Entry],
    transform: &dyn ContentTransform,
) -> Result<()> {
    let files = entries
        .iter()
        .filter(|e| !e.is_dir())
        .map(|entry| {
            let content = read_content(entry, transform)?;
            Ok(JsonFile {
                path: entry.rel_path(),
                size: entry.size(),
                content: String::from_utf8_lossy(&content).into_owned(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    serde_json::to_writer_pretty(&mut *writer, &JsonDocument { tree, files })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
