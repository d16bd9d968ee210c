// Listener module
// Creates the TCP listener and reports an occupied port distinctly

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::error::StartupError;

/// Pending connection queue length
const BACKLOG: i32 = 128;

/// Create a `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` is set so a restart can rebind a port in `TIME_WAIT`.
/// `SO_REUSEPORT` is deliberately left off: a port held by a live process
/// must fail with [`StartupError::AddrInUse`].
pub fn create_listener(addr: SocketAddr) -> Result<TcpListener, StartupError> {
    bind(addr).map_err(|e| StartupError::from_bind(addr, e))
}

fn bind(addr: SocketAddr) -> std::io::Result<TcpListener> {
    // Create socket with appropriate domain (IPv4 or IPv6)
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // On Windows SO_REUSEADDR would allow stealing a bound port
    #[cfg(not(windows))]
    socket.set_reuse_address(true)?;

    // Set non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_port_in_use() {
        let first = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = first.local_addr().unwrap();

        match create_listener(addr) {
            Err(StartupError::AddrInUse(reported)) => assert_eq!(reported, addr),
            other => panic!("expected AddrInUse, got {other:?}"),
        }
    }
}
