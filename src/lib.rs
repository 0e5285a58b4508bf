//! Waypost: a small HTTP service that collects location reports.
//!
//! Devices POST latitude/longitude/timestamp reports; they can be listed,
//! cleared, and are kept either in a JSON file or in process memory.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
pub use store::{LocationRecord, LocationStore};
