//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.

use std::collections::HashMap;
use std::path::Path;

/// Fallback for unknown or missing extensions
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Built-in mappings, keyed by lower-cased extension with leading dot
const BUILTIN_TYPES: &[(&str, &str)] = &[
    (".html", "text/html"),
    (".css", "text/css"),
    (".js", "text/javascript"),
    (".json", "application/json"),
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".gif", "image/gif"),
    (".svg", "image/svg+xml"),
    (".ico", "image/x-icon"),
];

/// Extension to Content-Type lookup table, read-only once built
#[derive(Debug, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl MimeTable {
    /// Table with the built-in mappings only
    pub fn builtin() -> Self {
        let types = BUILTIN_TYPES
            .iter()
            .map(|(ext, mime)| ((*ext).to_string(), (*mime).to_string()))
            .collect();
        Self { types }
    }

    /// Built-in mappings plus configured ones; configured entries win
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::builtin();
        for (ext, mime) in overrides {
            table.types.insert(normalize_extension(ext), mime.clone());
        }
        table
    }

    /// Get MIME Content-Type for a path
    ///
    /// Pure function of the path string; the file is never touched.
    pub fn lookup(&self, path: &Path) -> &str {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.types.get(&normalize_extension(ext)))
            .map_or(DEFAULT_CONTENT_TYPE, String::as_str)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// `"JSON"`, `".json"` and `"json"` all become `".json"`
fn normalize_extension(ext: &str) -> String {
    format!(".{}", ext.trim_start_matches('.').to_ascii_lowercase())
}
