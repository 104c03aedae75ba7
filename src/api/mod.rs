//! HTTP surface of the action server.
//!
//! `router` assembles the route table, `endpoints` holds one handler
//! per route, `types` carries the wire protocol, and `server` runs the
//! listener. Everything below this module is transport-free.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::action_server_router;
pub use types::ApiContext;
