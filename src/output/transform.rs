//! Per-file byte transforms applied before content is emitted

use std::collections::HashMap;
use std::path::Path;

use encoding_rs::Encoding;

use crate::encoding::{
    decode_to_utf8, lookup, normalize_extension, normalize_newlines, parse_encoding_map,
    remove_bom,
};
use crate::error::Result;

use super::config::OutputConfig;

/// Turns a file's raw bytes into the bytes written to the document.
pub trait ContentTransform {
    fn transform(&self, path: &Path, content: Vec<u8>) -> Result<Vec<u8>>;
}

/// Emits content exactly as read.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl ContentTransform for Passthrough {
    fn transform(&self, _path: &Path, content: Vec<u8>) -> Result<Vec<u8>> {
        Ok(content)
    }
}

/// Decodes configured encodings to UTF-8, drops a UTF-8 BOM and normalizes line endings.
#[derive(Debug, Default, Clone)]
pub struct TextNormalizer {
    default_encoding: Option<&'static Encoding>,
    by_extension: HashMap<String, &'static Encoding>,
}

impl TextNormalizer {
    pub fn new(
        default_encoding: Option<&'static Encoding>,
        by_extension: HashMap<String, &'static Encoding>,
    ) -> Self {
        Self {
            default_encoding,
            by_extension,
        }
    }

    /// Build from the encoding options of an `OutputConfig`.
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        let default_encoding = match config.encoding.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(lookup(name)?),
            _ => None,
        };
        let by_extension = match config.encoding_map.as_deref() {
            Some(spec) => parse_encoding_map(spec)?,
            None => HashMap::new(),
        };
        Ok(Self::new(default_encoding, by_extension))
    }

    fn encoding_for(&self, path: &Path) -> Option<&'static Encoding> {
        path.extension()
            .map(|ext| normalize_extension(&ext.to_string_lossy()))
            .and_then(|ext| self.by_extension.get(&ext).copied())
            .or(self.default_encoding)
    }
}

impl ContentTransform for TextNormalizer {
    fn transform(&self, path: &Path, content: Vec<u8>) -> Result<Vec<u8>> {
        let content = match self.encoding_for(path) {
            Some(encoding) => decode_to_utf8(encoding, content),
            None => content,
        };
        Ok(normalize_newlines(remove_bom(&content)))
    }
}
