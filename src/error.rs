//! Error types
//!
//! Per-request failures are recovered at the request boundary and mapped to a
//! status code. Startup failures are fatal and end the process with a non-zero
//! exit code.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while handling a single request
#[derive(Debug, Error)]
pub enum RequestError {
    /// Request path could not be decoded into a filesystem path
    #[error("malformed request path: {0}")]
    MalformedRequest(String),

    /// Resolved path escapes the root directory
    #[error("path escapes root directory: {}", .0.display())]
    TraversalViolation(PathBuf),

    /// Nothing exists at the resolved path
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("failed to read '{}': {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure before the server starts accepting connections
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot determine root directory: {0}")]
    RootDirectory(std::io::Error),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// Port already held by another process
    #[error(
        "Port {} is already in use. Please try:\n   1. Stop other servers running on port {}\n   2. Or change the port with DEVSERVE_SERVER__PORT or `server.port` in devserve.toml",
        .0.port(),
        .0.port()
    )]
    AddrInUse(SocketAddr),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log files: {0}")]
    Logger(std::io::Error),

    #[error("failed to build runtime: {0}")]
    Runtime(std::io::Error),

    #[error("failed to register signal handlers: {0}")]
    Signal(std::io::Error),
}

impl StartupError {
    /// Classify a bind error, singling out an occupied port
    pub fn from_bind(addr: SocketAddr, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::AddrInUse {
            Self::AddrInUse(addr)
        } else {
            Self::Bind { addr, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_request_error_messages() {
        let err = RequestError::TraversalViolation("/srv/secret.txt".into());
        assert_eq!(err.to_string(), "path escapes root directory: /srv/secret.txt");
        let err = RequestError::ReadFailure {
            path: "/srv/app/x".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read '/srv/app/x': denied");
    }

    #[test]
    fn test_bind_error_classification() {
        let addr: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        let in_use = StartupError::from_bind(addr, io::Error::from(io::ErrorKind::AddrInUse));
        assert!(matches!(in_use, StartupError::AddrInUse(_)));
        let message = in_use.to_string();
        assert!(message.contains("Port 3000 is already in use"));
        assert!(message.contains("DEVSERVE_SERVER__PORT"));

        let denied = StartupError::from_bind(addr, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(denied, StartupError::Bind { .. }));
    }
}
