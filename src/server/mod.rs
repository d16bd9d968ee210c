// Server module entry point
// Listener creation, connection serving, and graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used types
pub use listener::create_listener;
pub use server_loop::{start_server_loop, ServerLoopConfig};
pub use signal::{start_signal_handler, SignalHandler};
