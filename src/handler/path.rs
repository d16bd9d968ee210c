//! Path resolution and traversal guard
//!
//! Turns a raw request target into a filesystem path under the root directory.
//! Nothing here touches the filesystem.

use crate::error::RequestError;
use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Served in place of `/`
pub const INDEX_PATH: &str = "/index.html";

/// Outcome of resolving a request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Requested pathname as sent, without query or fragment, after the index substitution
    pub pathname: String,
    /// Candidate absolute filesystem path, lexically normalized
    pub fs_path: PathBuf,
}

/// Resolve a raw request target (`/a/b.css?v=1#top`) against `root`
pub fn resolve(raw_target: &str, root: &Path) -> Result<ResolvedPath, RequestError> {
    let raw_path = strip_query_and_fragment(raw_target);
    let decoded = decode_path(raw_path)?;

    let (pathname, decoded) = if decoded == "/" {
        (INDEX_PATH.to_string(), INDEX_PATH.to_string())
    } else {
        (raw_path.to_string(), decoded)
    };

    Ok(ResolvedPath {
        pathname,
        fs_path: join_normalized(root, &decoded),
    })
}

/// Reject any path that is not the root itself or nested inside it
pub fn guard(root: &Path, candidate: &Path) -> Result<(), RequestError> {
    let root = normalize(root);
    let candidate = normalize(candidate);
    // Component-wise: /srv/app does not prefix /srv/app-evil
    if candidate.is_absolute() && candidate.starts_with(&root) {
        Ok(())
    } else {
        Err(RequestError::TraversalViolation(candidate))
    }
}

fn strip_query_and_fragment(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    let path = &target[..end];
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// Percent-decode, failing on truncated escapes, invalid UTF-8, or NUL
fn decode_path(raw: &str) -> Result<String, RequestError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(RequestError::MalformedRequest(raw.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| RequestError::MalformedRequest(raw.to_string()))?;
    if decoded.contains('\0') {
        return Err(RequestError::MalformedRequest(raw.to_string()));
    }
    Ok(decoded.into_owned())
}

/// Join URL segments onto `root`, resolving `.` and `..` structurally
fn join_normalized(root: &Path, decoded: &str) -> PathBuf {
    let mut path = normalize(root);
    for segment in decoded.split(std::path::is_separator) {
        match segment {
            "" | "." => {}
            ".." => {
                path.pop();
            }
            name => path.push(name),
        }
    }
    // `/data.json/` names a directory; keep the separator so a regular file fails the probe
    if decoded.ends_with(std::path::is_separator) {
        path.push("");
    }
    path
}

/// Lexical normalization: drops `.` and trailing separators, folds `..`
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> PathBuf {
        PathBuf::from("/srv/app")
    }

    #[test]
    fn test_root_maps_to_index() {
        let resolved = resolve("/", &root()).unwrap();
        assert_eq!(resolved, resolve("/index.html", &root()).unwrap());
        assert_eq!(resolved.pathname, "/index.html");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/index.html"));
    }

    #[test]
    fn test_query_and_fragment_are_stripped() {
        let resolved = resolve("/css/site.css?v=3#top", &root()).unwrap();
        assert_eq!(resolved.pathname, "/css/site.css");
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/css/site.css"));

        let resolved = resolve("/?lang=en", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/index.html"));
    }

    #[test]
    fn test_percent_decoding() {
        let resolved = resolve("/my%20file.txt", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/my file.txt"));
        // 404 page shows what the client sent
        assert_eq!(resolved.pathname, "/my%20file.txt");

        // "%2F" decodes to "/" and is treated as a separator
        let resolved = resolve("/a%2Fb.json", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/a/b.json"));

        // Encoded root still gets the index substitution
        let resolved = resolve("%2F", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/index.html"));
    }

    #[test]
    fn test_malformed_encoding() {
        for bad in ["/%zz", "/file%", "/file%4", "/%ff%fe", "/nul%00.txt"] {
            assert!(
                matches!(resolve(bad, &root()), Err(RequestError::MalformedRequest(_))),
                "expected {bad} to be rejected"
            );
        }
    }

    #[test]
    fn test_dot_segments_are_resolved() {
        let resolved = resolve("/a/./b/../c.js", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/app/a/c.js"));

        let resolved = resolve("/../secret.txt", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/srv/secret.txt"));

        let resolved = resolve("/../../../../../../etc/passwd", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/etc/passwd"));

        let resolved = resolve("/%2e%2e/%2e%2e/etc/passwd", &root()).unwrap();
        assert_eq!(resolved.fs_path, PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn test_trailing_separator_is_kept() {
        let resolved = resolve("/data.json/", &root()).unwrap();
        assert!(resolved.fs_path.as_os_str().to_string_lossy().ends_with("data.json/"));
        assert!(guard(&root(), &resolved.fs_path).is_ok());

        let resolved = resolve("/data.json", &root()).unwrap();
        assert!(!resolved.fs_path.as_os_str().to_string_lossy().ends_with('/'));
    }

    #[test]
    fn test_guard_accepts_root_and_descendants() {
        assert!(guard(&root(), Path::new("/srv/app")).is_ok());
        assert!(guard(&root(), Path::new("/srv/app/index.html")).is_ok());
        assert!(guard(&root(), Path::new("/srv/app/deep/nested/file.png")).is_ok());
        assert!(guard(Path::new("/srv/app/"), Path::new("/srv/app/x")).is_ok());
        assert!(guard(Path::new("/srv/./app"), Path::new("/srv/app/x")).is_ok());
    }

    #[test]
    fn test_guard_rejects_escapes() {
        assert!(matches!(
            guard(&root(), Path::new("/srv/secret.txt")),
            Err(RequestError::TraversalViolation(_))
        ));
        assert!(guard(&root(), Path::new("/etc/passwd")).is_err());
        assert!(guard(&root(), Path::new("/srv/app/../secret")).is_err());
        assert!(guard(&root(), Path::new("/srv")).is_err());
    }

    #[test]
    fn test_guard_rejects_sibling_prefix() {
        assert!(guard(&root(), Path::new("/srv/app-evil/index.html")).is_err());
        assert!(guard(&root(), Path::new("/srv/apple")).is_err());
    }

    #[test]
    fn test_resolve_then_guard() {
        for target in ["/../secret.txt", "/../../etc/passwd", "/..", "/a/../../x"] {
            let resolved = resolve(target, &root()).unwrap();
            assert!(guard(&root(), &resolved.fs_path).is_err(), "{target} escaped");
        }
        for target in ["/", "/a/../b.css", "/./data.json", "/a/.."] {
            let resolved = resolve(target, &root()).unwrap();
            assert!(guard(&root(), &resolved.fs_path).is_ok(), "{target} rejected");
        }
    }
}
