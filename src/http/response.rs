//! HTTP response building module
//!
//! Builders for every status the server emits. All of them carry the CORS
//! headers, including error responses.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::Response;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

/// Start a response with the CORS trio already set
fn cors_builder(status: u16) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", CORS_ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)
}

/// Build 200 response carrying file bytes unchanged
pub fn build_file_response(data: Bytes, content_type: &str) -> Response<Full<Bytes>> {
    cors_builder(200)
        .header("Content-Type", content_type)
        .body(Full::new(data))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    cors_builder(200)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_plain_response(400, "Bad Request")
}

/// Build 403 Forbidden response
pub fn build_403_response() -> Response<Full<Bytes>> {
    build_plain_response(403, "Forbidden")
}

/// Build 404 Not Found page naming the requested path
///
/// `pathname` is embedded as given; callers decide whether to escape it.
pub fn build_404_response(pathname: &str) -> Response<Full<Bytes>> {
    let html = not_found_page(pathname);
    cors_builder(404)
        .header("Content-Type", "text/html")
        .body(Full::new(Bytes::from(html)))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_plain_response(500, "Internal Server Error")
}

fn build_plain_response(status: u16, message: &'static str) -> Response<Full<Bytes>> {
    cors_builder(status)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(message)))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::from(message)))
        })
}

fn not_found_page(pathname: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>404 - File Not Found</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            text-align: center;
            padding: 50px;
            background: #f4f7f4;
        }}
        .container {{
            max-width: 600px;
            margin: 0 auto;
            background: white;
            padding: 2rem;
            border-radius: 10px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }}
        h1 {{ color: #2d7a3c; }}
        a {{ color: #2d7a3c; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>404 - File Not Found</h1>
        <p>The requested file <code>{pathname}</code> was not found.</p>
        <p><a href="/">&larr; Back to home</a></p>
    </div>
</body>
</html>
"#
    )
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
