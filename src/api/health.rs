//! Health check endpoints for container probes

use axum::{http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

/// Health response body
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Returns 200 while the process is serving; the service has no
/// dependencies to probe beyond its own startup.
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(response))
}

/// Liveness check - simple check to verify the service is running
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "healthy",
            version: "1.0.0",
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"healthy","version":"1.0.0"}"#);
    }
}
