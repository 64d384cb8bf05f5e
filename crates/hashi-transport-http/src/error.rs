//! Error types for the HTTP transport layer.

use thiserror::Error;

/// Errors that can occur in the HTTP transport.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// The configured host and port do not form a socket address.
    #[error("invalid listen address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },
    /// Failed to bind to the TCP address.
    #[error("failed to bind on {addr}: {source}")]
    Bind {
        /// The address string.
        addr: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server encountered an I/O error while serving.
    #[error("server error: {0}")]
    Serve(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_error_displays_address() {
        let err = HttpTransportError::Bind {
            addr: "127.0.0.1:8000".into(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("127.0.0.1:8000"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn invalid_address_names_input() {
        let err = HttpTransportError::InvalidAddress {
            addr: "localhost:80".into(),
            reason: "invalid socket address syntax".into(),
        };
        assert!(err.to_string().contains("'localhost:80'"));
    }

    #[test]
    fn serve_error_displays_message() {
        let err = HttpTransportError::Serve("connection reset".into());
        assert!(err.to_string().contains("connection reset"));
    }
}
