//! Static file serving module
//!
//! Existence probe and full-file read for an already guarded path.

use crate::error::RequestError;
use hyper::body::Bytes;
use std::path::Path;
use tokio::fs;

/// Check that something exists at `path`
///
/// Follows symlinks. Any probe error counts as absent.
pub async fn check_exists(path: &Path) -> Result<(), RequestError> {
    match fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(RequestError::NotFound(path.to_path_buf())),
    }
}

/// Read the whole file into memory, bytes untouched
pub async fn read_file(path: &Path) -> Result<Bytes, RequestError> {
    fs::read(path)
        .await
        .map(Bytes::from)
        .map_err(|source| RequestError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })
}

/// Existence check followed by a single read
pub async fn load(path: &Path) -> Result<Bytes, RequestError> {
    check_exists(path).await?;
    read_file(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        let bytes = [0u8, 159, 146, 150, 255, b'\n'];
        std::fs::write(&path, bytes).unwrap();

        let data = load(&path).await.unwrap();
        assert_eq!(&data[..], &bytes[..]);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");
        assert!(matches!(
            load(&path).await,
            Err(RequestError::NotFound(p)) if p == path
        ));
    }

    #[tokio::test]
    async fn test_directory_is_read_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let result = load(&dir.path().join("sub")).await;
        assert!(matches!(result, Err(RequestError::ReadFailure { .. })));
    }

    #[tokio::test]
    async fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, b"").unwrap();
        assert!(load(&path).await.unwrap().is_empty());
    }
}
