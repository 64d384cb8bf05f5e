//! HTTP transport adapter for hashi.
//! Serves XML-RPC over `POST <rpc_path>` and a method listing over `GET <rpc_path>`.

mod error;
mod listing;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use router::{build_router, AppState};
pub use server::HttpServer;
