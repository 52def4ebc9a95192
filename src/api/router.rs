use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::health;
use super::middleware::{logging_middleware, security_headers_middleware};
use super::state::AppState;
use super::token;
use crate::config::CorsConfig;

/// Create the router with application state
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/generate-token", post(token::generate_token))
        .with_state(state);

    let router = match cors_layer(cors) {
        Some(layer) => router.layer(layer),
        None => router,
    };

    router
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Build the CORS layer; an empty origin list allows any origin
fn cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.enabled {
        return None;
    }

    if config.allowed_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::domain::Credentials;
    use crate::infrastructure::services::{TokenService, TokenServiceConfig};
    use crate::infrastructure::token::AccessTokenBuilder;

    fn state() -> AppState {
        let credentials = Arc::new(Credentials::new("app", "certificate").unwrap());
        let service = TokenService::new(
            AccessTokenBuilder::new(credentials),
            TokenServiceConfig::default(),
        );
        AppState::new(Arc::new(service))
    }

    async fn preflight(cors: &CorsConfig, origin: &str) -> Option<String> {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/generate-token")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = create_router(state(), cors).oneshot(request).await.unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        for uri in ["/health", "/live"] {
            let response = create_router(state(), &CorsConfig::default())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = create_router(state(), &CorsConfig::default())
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_permissive_by_default() {
        let allowed = preflight(&CorsConfig::default(), "https://example.com").await;
        assert_eq!(allowed.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_cors_origin_list() {
        let cors = CorsConfig {
            enabled: true,
            allowed_origins: vec!["https://app.example.com".to_string()],
        };

        assert_eq!(
            preflight(&cors, "https://app.example.com").await.as_deref(),
            Some("https://app.example.com")
        );
        assert_eq!(preflight(&cors, "https://evil.example.com").await, None);
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let cors = CorsConfig {
            enabled: false,
            allowed_origins: Vec::new(),
        };

        assert_eq!(preflight(&cors, "https://example.com").await, None);
    }
}
