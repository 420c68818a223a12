//! TCP listener bound with address reuse.
//!
//! # Responsibilities
//! - Bind to the configured address with `SO_REUSEADDR`
//! - Accept incoming TCP connections, one at a time
//!
//! No admission control: every connection the OS hands us is accepted.
//! Bounding concurrent connections is an explicit non-goal of this server.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket, TcpStream};

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    /// Failed to accept a connection.
    #[error("failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),
}

/// A listening socket producing one [`TcpStream`] per accepted connection.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to `addr` with address reuse enabled, so restarts do not trip
    /// over sockets lingering in TIME_WAIT. Port 0 requests an ephemeral
    /// port; use [`local_addr`](Self::local_addr) to discover it.
    pub fn bind(addr: SocketAddr) -> Result<Self, ListenerError> {
        let bind_err = |source| ListenerError::Bind { addr, source };

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(bind_err)?;
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;
        let inner = socket.listen(1024).map_err(bind_err)?;

        tracing::info!(
            address = %inner.local_addr().map_err(bind_err)?,
            "Listener bound"
        );

        Ok(Self { inner })
    }

    /// Accept the next connection. The caller re-invokes this in a loop;
    /// each call arms exactly one pending accept.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        tracing::debug!(peer_addr = %addr, "Connection accepted");
        Ok((stream, addr))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_ephemeral_port_reports_local_addr() {
        let listener = Listener::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn accept_yields_connected_stream() {
        let listener = Listener::bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::spawn(async move { TcpStream::connect(addr).await });
        let (stream, peer) = listener.accept().await.unwrap();
        assert_eq!(stream.local_addr().unwrap(), addr);
        assert_eq!(peer.ip(), addr.ip());
        client.await.unwrap().unwrap();
    }
}
