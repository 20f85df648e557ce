//! Path normalization helpers shared by the filters and the scanner

use std::path::{Component, Path};

/// Join the normal components of a relative path with `/`, whatever the host separator.
pub fn to_slash(rel: &Path) -> String {
    let mut out = String::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

/// Path of `path` relative to `root` in forward-slash form.
///
/// Returns `None` when `path` is not under `root`, and an empty string for `root` itself.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(to_slash)
}
