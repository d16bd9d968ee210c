//! Request processing pipeline
//!
//! Entry point for HTTP request processing. Each request runs the same fixed
//! sequence: resolve, guard, preflight check, existence check, read, respond.
//! Any gate may end the request early with an error response.

use crate::config::AppState;
use crate::error::RequestError;
use crate::handler::path::{self, ResolvedPath};
use crate::handler::static_files;
use crate::http::{self, response::escape_html};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Per-request values, dropped once the response is built
#[derive(Debug)]
pub struct RequestContext {
    pub method: Method,
    /// Request target as received, query string included
    pub url: String,
    pub resolved: Option<ResolvedPath>,
    pub status: u16,
}

impl RequestContext {
    fn new<B>(req: &Request<B>) -> Self {
        let url = req
            .uri()
            .path_and_query()
            .map_or_else(|| "/".to_string(), |pq| pq.as_str().to_string());
        Self {
            method: req.method().clone(),
            url,
            resolved: None,
            status: 0,
        }
    }
}

/// Successful end states
enum Outcome {
    Preflight,
    File { data: Bytes, content_type: String },
}

/// Main entry point for HTTP request handling
///
/// The request body is never read; every method except OPTIONS is served as a
/// file read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (response, entry) = respond(&req, &state).await;
    if state.access_log {
        if let Some(entry) = entry {
            logger::log_access(&entry, &state.access_log_format);
        }
    }
    Ok(response)
}

/// Run the pipeline, returning the response and its access record, if any
async fn respond<B>(
    req: &Request<B>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<AccessLogEntry>) {
    let mut ctx = RequestContext::new(req);

    let mut served_bytes = None;
    let response = match process(&mut ctx, state).await {
        Ok(Outcome::Preflight) => http::build_options_response(),
        Ok(Outcome::File { data, content_type }) => {
            served_bytes = Some(data.len());
            http::build_file_response(data, &content_type)
        }
        Err(err) => error_response(&ctx, &err, state),
    };
    ctx.status = response.status().as_u16();

    let entry = access_entry(ctx, served_bytes);
    (response, entry)
}

/// Only completed 200 file reads are access-logged
fn access_entry(ctx: RequestContext, served_bytes: Option<usize>) -> Option<AccessLogEntry> {
    let body_bytes = served_bytes?;
    (ctx.status == 200).then(|| {
        AccessLogEntry::new(ctx.method.to_string(), ctx.url, ctx.status, body_bytes)
    })
}

async fn process(ctx: &mut RequestContext, state: &AppState) -> Result<Outcome, RequestError> {
    // 1. Resolve and guard before any filesystem access
    let resolved = path::resolve(&ctx.url, &state.root)?;
    path::guard(&state.root, &resolved.fs_path)?;
    let fs_path = resolved.fs_path.clone();
    ctx.resolved = Some(resolved);

    // 2. Preflight
    if ctx.method == Method::OPTIONS {
        return Ok(Outcome::Preflight);
    }

    // 3. Existence check and read
    let data = static_files::load(&fs_path).await?;
    let content_type = state.mime.lookup(&fs_path).to_string();

    Ok(Outcome::File { data, content_type })
}

fn error_response(
    ctx: &RequestContext,
    err: &RequestError,
    state: &AppState,
) -> Response<Full<Bytes>> {
    match err {
        RequestError::MalformedRequest(raw) => {
            logger::log_warning(&format!("Malformed request path: {raw}"));
            http::build_400_response()
        }
        RequestError::TraversalViolation(resolved) => {
            logger::log_traversal_blocked(&ctx.url, resolved);
            http::build_403_response()
        }
        RequestError::NotFound(_) => {
            let pathname = ctx
                .resolved
                .as_ref()
                .map_or(ctx.url.as_str(), |r| r.pathname.as_str());
            if state.escape_not_found_path {
                http::build_404_response(&escape_html(pathname))
            } else {
                http::build_404_response(pathname)
            }
        }
        RequestError::ReadFailure { .. } => {
            logger::log_error(&err.to_string());
            http::build_500_response()
        }
    }
}
