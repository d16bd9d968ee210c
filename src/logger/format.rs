//! Access log format module
//!
//! Supports:
//! - `default` (`[timestamp] METHOD /url - status`)
//! - `json` (one JSON object per line)
//! - Custom patterns with variables

use chrono::{DateTime, SecondsFormat, Utc};

/// One completed request
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Response timestamp
    pub time: DateTime<Utc>,
    /// HTTP method as received
    pub method: String,
    /// Raw request URL, query string included
    pub url: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(method: String, url: String, status: u16, body_bytes: usize) -> Self {
        Self {
            time: Utc::now(),
            method,
            url,
            status,
            body_bytes,
        }
    }

    /// ISO-8601 timestamp with millisecond precision, `Z` suffix
    pub fn timestamp(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Format the log entry according to the specified format
    pub fn format(&self, format: &str) -> String {
        match format {
            "default" => self.format_default(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    fn format_default(&self) -> String {
        format!(
            "[{}] {} {} - {}",
            self.timestamp(),
            self.method,
            self.url,
            self.status
        )
    }

    fn format_json(&self) -> String {
        serde_json::json!({
            "time": self.timestamp(),
            "method": self.method,
            "url": self.url,
            "status": self.status,
            "body_bytes": self.body_bytes,
        })
        .to_string()
    }

    /// Custom format with variable substitution
    ///
    /// Supported variables:
    /// - `$time_iso8601` - ISO 8601 timestamp
    /// - `$request_method` - HTTP method
    /// - `$request_uri` - Raw request URL
    /// - `$status` - Response status code
    /// - `$body_bytes_sent` - Response body size
    fn format_custom(&self, pattern: &str) -> String {
        pattern
            .replace("$time_iso8601", &self.timestamp())
            .replace("$request_method", &self.method)
            .replace("$request_uri", &self.url)
            .replace("$status", &self.status.to_string())
            .replace("$body_bytes_sent", &self.body_bytes.to_string())
    }
}
