//! Output configuration types

/// Document format written to the output sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tree, blank line, then `=== path ===` delimited file contents
    #[default]
    Text,
    /// The same information as one JSON object
    Json,
}

/// Configuration for output assembly.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Encoding applied to every file without a per-extension override
    pub encoding: Option<String>,
    /// Per-extension encodings, e.g. `txt:shift_jis,log:euc-jp`
    pub encoding_map: Option<String>,
}
