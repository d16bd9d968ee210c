//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::error::StartupError;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    write_info("======================================");
    write_info("Static file server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Serving files from: {}", root.display()));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("CORS enabled for all origins");
    write_info("Press Ctrl+C to stop the server");
    write_info("======================================\n");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_startup_error(err: &StartupError) {
    write_error(&format!("[FATAL] {err}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_traversal_blocked(url: &str, resolved: &Path) {
    log_warning(&format!(
        "Path traversal attempt blocked: {url} -> {}",
        resolved.display()
    ));
}

pub fn log_signal_received(name: &str) {
    write_info(&format!("\n[SIGNAL] {name} received"));
}

pub fn log_shutdown_started() {
    write_info("[SHUTDOWN] Shutting down server...");
    write_info("[SHUTDOWN] No longer accepting connections, waiting for in-flight requests");
}

pub fn log_server_stopped() {
    write_info("[SHUTDOWN] Server stopped successfully");
}
