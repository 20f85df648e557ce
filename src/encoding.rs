//! Character encoding lookup and byte-level text normalization
//!
//! Encoding names follow the WHATWG label set (`shift_jis`, `euc-jp`, `windows-1252`,
//! ...). Lookup is case-insensitive and treats `_` and `-` as interchangeable.

use std::collections::HashMap;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Resolve an encoding name.
pub fn lookup(name: &str) -> Result<&'static Encoding> {
    let lower = name.trim().to_ascii_lowercase();
    [lower.clone(), lower.replace('_', "-"), lower.replace('-', "_")]
        .iter()
        .find_map(|candidate| Encoding::for_label(candidate.as_bytes()))
        .ok_or_else(|| Error::UnsupportedEncoding(name.to_string()))
}

/// Parse `ext:encoding[,ext:encoding...]` into a map keyed by normalized extension.
///
/// Empty input yields an empty map. Later items override earlier ones.
pub fn parse_encoding_map(spec: &str) -> Result<HashMap<String, &'static Encoding>> {
    let mut map = HashMap::new();

    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (ext, name) = item
            .split_once(':')
            .ok_or_else(|| Error::InvalidEncodingMap(item.to_string()))?;

        let ext = normalize_extension(ext);
        if ext.is_empty() || name.trim().is_empty() {
            return Err(Error::InvalidEncodingMap(item.to_string()));
        }

        map.insert(ext, lookup(name)?);
    }

    Ok(map)
}

/// Lowercase an extension and strip any leading dot: `.TXT` -> `txt`.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Decode `content` from `encoding` into UTF-8 bytes.
///
/// UTF-8 input is returned untouched. Malformed sequences become U+FFFD.
pub fn decode_to_utf8(encoding: &'static Encoding, content: Vec<u8>) -> Vec<u8> {
    if encoding == UTF_8 {
        return content;
    }
    let (decoded, had_errors) = encoding.decode_without_bom_handling(&content);
    if had_errors {
        log::debug!("malformed {} input replaced", encoding.name());
    }
    decoded.into_owned().into_bytes()
}

/// Strip a leading UTF-8 byte order mark, if any.
pub fn remove_bom(content: &[u8]) -> &[u8] {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len());
    let mut iter = content.iter().peekable();
    while let Some(&byte) = iter.next() {
        if byte == b'\r' {
            if iter.peek() == Some(&&b'\n') {
                iter.next();
            }
            out.push(b'\n');
        } else {
            out.push(byte);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{EUC_JP, SHIFT_JIS, WINDOWS_1252};

    #[test]
    fn test_lookup_names() {
        assert_eq!(lookup("shift_jis").unwrap(), SHIFT_JIS);
        assert_eq!(lookup("Shift_JIS").unwrap(), SHIFT_JIS);
        assert_eq!(lookup("euc-jp").unwrap(), EUC_JP);
        assert_eq!(lookup("EUC_JP").unwrap(), EUC_JP);
        assert_eq!(lookup("windows-1252").unwrap(), WINDOWS_1252);
        assert_eq!(lookup("utf-8").unwrap(), UTF_8);
        assert_eq!(lookup("utf8").unwrap(), UTF_8);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("invalid-encoding").unwrap_err();
        assert!(matches!(err, Error::UnsupportedEncoding(name) if name == "invalid-encoding"));
    }

    #[test]
    fn test_decode_shift_jis() {
        let sjis = vec![0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD];
        assert_eq!(decode_to_utf8(SHIFT_JIS, sjis), "こんにちは".as_bytes());
    }

    #[test]
    fn test_decode_euc_jp() {
        let euc = vec![0xC6, 0xFC, 0xCB, 0xDC];
        assert_eq!(decode_to_utf8(EUC_JP, euc), "日本".as_bytes());
    }

    #[test]
    fn test_decode_windows_1252() {
        assert_eq!(decode_to_utf8(WINDOWS_1252, vec![b'c', b'a', b'f', 0xE9]), "café".as_bytes());
    }

    #[test]
    fn test_decode_utf8_passthrough() {
        let raw = vec![0xFF, b'a'];
        assert_eq!(decode_to_utf8(UTF_8, raw.clone()), raw);
    }

    #[test]
    fn test_decode_invalid_bytes_replaced() {
        let decoded = decode_to_utf8(SHIFT_JIS, vec![b'a', 0x82]);
        assert_eq!(String::from_utf8(decoded).unwrap(), "a\u{FFFD}");
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_to_utf8(SHIFT_JIS, Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_encoding_map() {
        let map = parse_encoding_map("txt:shift_jis, .LOG:euc-jp").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["txt"], SHIFT_JIS);
        assert_eq!(map["log"], EUC_JP);
    }

    #[test]
    fn test_parse_encoding_map_empty() {
        assert!(parse_encoding_map("").unwrap().is_empty());
        assert!(parse_encoding_map(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_encoding_map_errors() {
        assert!(matches!(parse_encoding_map("txt"), Err(Error::InvalidEncodingMap(_))));
        assert!(matches!(parse_encoding_map(":sjis"), Err(Error::InvalidEncodingMap(_))));
        assert!(matches!(parse_encoding_map("txt:"), Err(Error::InvalidEncodingMap(_))));
        assert!(matches!(
            parse_encoding_map("txt:nope"),
            Err(Error::UnsupportedEncoding(_))
        ));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".TXT"), "txt");
        assert_eq!(normalize_extension("Md"), "md");
        assert_eq!(normalize_extension(""), "");
    }

    #[test]
    fn test_remove_bom() {
        assert_eq!(remove_bom(b"\xEF\xBB\xBFhello"), b"hello");
        assert_eq!(remove_bom(b"hello"), b"hello");
        assert_eq!(remove_bom(b"\xEF\xBB"), b"\xEF\xBB");
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines(b"a\r\nb\rc\nd"), b"a\nb\nc\nd");
        assert_eq!(normalize_newlines(b"\r\n\r\n"), b"\n\n");
        assert_eq!(normalize_newlines(b"plain"), b"plain");
    }
}
