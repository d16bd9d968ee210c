use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use error::StartupError;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            logger::log_startup_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), StartupError> {
    let cfg = config::Config::load()?;
    logger::init(&cfg).map_err(StartupError::Logger)?;

    // Tokio runtime; request handling itself stays on one LocalSet
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), StartupError> {
    let root = config::AppState::executable_root().map_err(StartupError::RootDirectory)?;
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals)).map_err(StartupError::Signal)?;

    let state = Arc::new(config::AppState::new(&cfg, root));
    logger::log_server_start(&addr, &state.root, &cfg);

    let loop_config = server::ServerLoopConfig {
        keep_alive: cfg.server.keep_alive,
        shutdown: Arc::clone(&signals.shutdown),
    };

    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, loop_config))
        .await;
    Ok(())
}
