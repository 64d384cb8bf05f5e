//! HTTP server that binds an axum Router to a TCP socket.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use hashi_dispatch::Dispatcher;

use crate::error::HttpTransportError;
use crate::router::{build_router, AppState};

/// Axum-based HTTP server for the XML-RPC transport.
pub struct HttpServer {
    pub(crate) addr: SocketAddr,
    pub(crate) state: AppState,
}

impl HttpServer {
    /// Creates a new HTTP server.
    ///
    /// # Arguments
    ///
    /// * `dispatcher` - shared XML-RPC dispatcher
    /// * `addr` - socket address to listen on
    /// * `rpc_path` - path the endpoint is mounted on
    pub fn new(dispatcher: Arc<Dispatcher>, addr: SocketAddr, rpc_path: impl Into<String>) -> Self {
        Self {
            addr,
            state: AppState {
                dispatcher,
                rpc_path: rpc_path.into(),
            },
        }
    }

    /// Creates a server listening on `host:port`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpTransportError::InvalidAddress`] if `host` is not an
    /// IP address literal.
    pub fn from_host_port(
        dispatcher: Arc<Dispatcher>,
        host: &str,
        port: u16,
        rpc_path: impl Into<String>,
    ) -> Result<Self, HttpTransportError> {
        let addr = if host.contains(':') {
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        let addr = addr
            .parse::<SocketAddr>()
            .map_err(|e| HttpTransportError::InvalidAddress {
                addr,
                reason: e.to_string(),
            })?;
        Ok(Self::new(dispatcher, addr, rpc_path))
    }

    /// Starts the server and blocks until it exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP bind fails or the server crashes.
    pub async fn run(self) -> Result<(), HttpTransportError> {
        let listener =
            TcpListener::bind(self.addr)
                .await
                .map_err(|e| HttpTransportError::Bind {
                    addr: self.addr.to_string(),
                    source: e,
                })?;

        tracing::info!(
            addr = %self.addr,
            rpc_path = %self.state.rpc_path,
            methods = self.state.dispatcher.registry().len(),
            "hashi XML-RPC server ready"
        );

        let router = build_router(self.state);
        axum::serve(listener, router)
            .await
            .map_err(|e| HttpTransportError::Serve(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_dispatcher() -> Arc<Dispatcher> {
        Arc::new(Dispatcher::new(Arc::default(), Default::default()))
    }

    #[test]
    fn new_sets_address() {
        let addr: SocketAddr = "127.0.0.1:3000".parse().expect("addr");
        let server = HttpServer::new(make_dispatcher(), addr, "/RPC2");
        assert_eq!(server.addr.port(), 3000);
    }

    #[test]
    fn new_stores_rpc_path() {
        let addr: SocketAddr = "0.0.0.0:8000".parse().expect("addr");
        let server = HttpServer::new(make_dispatcher(), addr, "/xmlrpc/");
        assert_eq!(server.state.rpc_path, "/xmlrpc/");
    }

    #[test]
    fn from_host_port_accepts_ip_literals() {
        let v4 = HttpServer::from_host_port(make_dispatcher(), "127.0.0.1", 8000, "/RPC2")
            .expect("ipv4");
        assert_eq!(v4.addr.port(), 8000);
        let v6 = HttpServer::from_host_port(make_dispatcher(), "::1", 8001, "/RPC2").expect("ipv6");
        assert!(v6.addr.is_ipv6());
    }

    #[test]
    fn from_host_port_rejects_hostnames() {
        let result = HttpServer::from_host_port(make_dispatcher(), "not a host", 8000, "/RPC2");
        assert!(matches!(result, Err(HttpTransportError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = taken.local_addr().expect("addr");
        let err = HttpServer::new(make_dispatcher(), addr, "/RPC2")
            .run()
            .await
            .expect_err("port in use");
        assert!(matches!(err, HttpTransportError::Bind { .. }));
    }
}
