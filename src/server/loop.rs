// Server loop module
// Accepts connections until shutdown, then drains in-flight requests

use std::sync::Arc;
use hyper_util::server::graceful::GracefulShutdown;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::handle_connection;
use crate::config::AppState;
use crate::logger;

/// Configuration for server loop behavior
pub struct ServerLoopConfig {
    pub keep_alive: bool,
    /// Notified once to stop accepting and drain
    pub shutdown: Arc<Notify>,
}

/// Accept loop; must run inside a `LocalSet`
///
/// Returns after shutdown has been requested and every open connection has
/// finished its current response.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    config: ServerLoopConfig,
) {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _peer_addr)) => {
                        handle_connection(stream, Arc::clone(&state), config.keep_alive, &graceful);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = config.shutdown.notified() => {
                break;
            }
        }
    }

    logger::log_shutdown_started();
    drop(listener);
    graceful.shutdown().await;
    logger::log_server_stopped();
}
