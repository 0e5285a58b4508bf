//! HTTP route handlers.
//!
//! The location API and health check are marked `no-store` so no intermediate
//! cache ever serves a stale collection. The server info page changes only on
//! restart and gets a short public max-age.
//!
//! Request tracing is enabled via middleware that assigns a request ID to each
//! incoming request, allowing correlation of all logs within a request.

pub mod health;
pub mod home;
pub mod locations;

use std::fmt;

use axum::{middleware, routing::get, Router};
use axum::http::header::{HeaderValue, CACHE_CONTROL};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_API, CACHE_CONTROL_INFO};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// A route advertised on the info page and in 404 responses.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

pub const ENDPOINTS: &[Endpoint] = &[
    Endpoint {
        method: "GET",
        path: "/api/locations",
        description: "Get all locations",
    },
    Endpoint {
        method: "POST",
        path: "/api/locations",
        description: "Save new locations",
    },
    Endpoint {
        method: "DELETE",
        path: "/api/locations",
        description: "Clear all locations",
    },
    Endpoint {
        method: "GET",
        path: "/health",
        description: "Health check",
    },
    Endpoint {
        method: "GET",
        path: "/",
        description: "Server info",
    },
];

/// Creates the Axum router with all routes, cache headers and CORS.
pub fn create_router(state: AppState) -> Router {
    // Location API and health - never cached
    let api_routes = Router::new()
        .route(
            "/api/locations",
            get(locations::list)
                .post(locations::create)
                .delete(locations::clear),
        )
        .route("/health", get(health::health))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_API),
        ));

    // Server info - short cache
    let info_routes = Router::new().route("/", get(home::index)).layer(
        SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_INFO),
        ),
    );

    let router = Router::new()
        .merge(api_routes)
        .merge(info_routes)
        .fallback(home::not_found)
        .with_state(state.clone());

    // All origins, methods and headers allowed
    let router = if state.config.cors.permissive {
        router.layer(CorsLayer::very_permissive())
    } else {
        router
    };

    // Request ID middleware - creates root span with request_id for correlation
    router.layer(middleware::from_fn(request_id_layer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        assert_eq!(ENDPOINTS[0].to_string(), "GET /api/locations");
        assert_eq!(ENDPOINTS[2].to_string(), "DELETE /api/locations");
    }

    #[test]
    fn test_endpoints_cover_location_methods() {
        let methods: Vec<_> = ENDPOINTS
            .iter()
            .filter(|e| e.path == "/api/locations")
            .map(|e| e.method)
            .collect();
        assert_eq!(methods, vec!["GET", "POST", "DELETE"]);
    }
}
