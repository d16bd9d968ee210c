// Application state module
// Immutable per-process serving state, built once at startup

use std::path::{Path, PathBuf};

use super::types::Config;
use crate::http::MimeTable;

/// State shared by every request
///
/// Constructed once and handed to connections behind an `Arc`; nothing in it
/// changes while the server runs.
#[derive(Debug)]
pub struct AppState {
    /// Normalized absolute root directory; the boundary for every served file
    pub root: PathBuf,
    pub mime: MimeTable,
    pub access_log: bool,
    pub access_log_format: String,
    pub escape_not_found_path: bool,
}

impl AppState {
    pub fn new(config: &Config, root: PathBuf) -> Self {
        Self {
            root,
            mime: MimeTable::with_overrides(&config.http.mime_types),
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
            escape_not_found_path: config.http.escape_not_found_path,
        }
    }

    /// Root directory of the running executable, canonicalized
    pub fn executable_root() -> std::io::Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        dir.canonicalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_config() {
        let mut cfg = Config::load_from("does-not-exist/devserve").unwrap();
        cfg.http
            .mime_types
            .insert(".WASM".to_string(), "application/wasm".to_string());
        cfg.http.escape_not_found_path = true;

        let state = AppState::new(&cfg, PathBuf::from("/srv/app"));
        assert_eq!(state.root, PathBuf::from("/srv/app"));
        assert!(state.access_log);
        assert!(state.escape_not_found_path);
        assert_eq!(state.mime.lookup(Path::new("/srv/app/x.wasm")), "application/wasm");
    }

    #[test]
    fn test_executable_root_is_absolute_dir() {
        let root = AppState::executable_root().unwrap();
        assert!(root.is_absolute());
        assert!(root.is_dir());
    }
}
