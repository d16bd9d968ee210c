// Connection handling module
// Serves a single TCP connection on the local task set

use std::sync::Arc;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned local task.
///
/// The connection is registered with `graceful` so shutdown can wait for
/// in-flight responses. Requests on one connection are handled in order; no
/// read timeout is applied.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `state` - Shared serving state
/// * `keep_alive` - Whether HTTP/1.1 keep-alive is enabled
/// * `graceful` - Shutdown watcher for this listener
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    state: Arc<AppState>,
    keep_alive: bool,
    graceful: &GracefulShutdown,
) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(keep_alive);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
    );
    let conn = graceful.watch(conn);

    tokio::task::spawn_local(async move {
        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
