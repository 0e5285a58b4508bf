//! HTTP server module.
//!
//! Plain HTTP only; TLS is expected to be terminated by a reverse proxy.
//! The server shuts down gracefully on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{bind_addr, start_server, ServerError};
