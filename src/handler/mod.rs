//! Request handler module
//!
//! Maps request paths onto files under the root directory and serves them.

pub mod path;
pub mod request;
pub mod static_files;

// Re-export main entry point
pub use request::handle_request;
