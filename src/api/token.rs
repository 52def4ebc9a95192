//! Token issuance endpoint

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, GenerateTokenRequest, GenerateTokenResponse, Json};

/// POST /generate-token
///
/// A `null` body is treated like `{}` and rejected for the missing channel name.
pub async fn generate_token(
    State(state): State<AppState>,
    Json(body): Json<Option<GenerateTokenRequest>>,
) -> Result<Json<GenerateTokenResponse>, ApiError> {
    let request = body.unwrap_or_default().into_domain()?;

    debug!(channel = %request.channel_name, role = %request.role, "Generating token");

    let issued = state.token_service.issue(request)?;

    Ok(Json(GenerateTokenResponse {
        token: issued.token,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::router::create_router;
    use crate::api::state::AppState;
    use crate::config::CorsConfig;
    use crate::domain::{Credentials, Role, UserIdentity};
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::services::{TokenService, TokenServiceConfig};
    use crate::infrastructure::token::{AccessTokenBuilder, AccessTokenVerifier};

    const APP_ID: &str = "970CA35de60c44645bbae8a215061b33";
    const T: i64 = 1_700_000_000;

    fn credentials() -> Arc<Credentials> {
        Arc::new(Credentials::new(APP_ID, "certificate").unwrap())
    }

    fn app() -> Router {
        let service = TokenService::with_clock(
            AccessTokenBuilder::new(credentials()),
            TokenServiceConfig::default(),
            Arc::new(FixedClock(T)),
        );
        create_router(AppState::new(Arc::new(service)), &CorsConfig::default())
    }

    async fn post(body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/generate-token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn verify(token: &str, channel: &str, identity: UserIdentity) -> crate::domain::VerifiedToken {
        AccessTokenVerifier::new(credentials())
            .verify(token, channel, &identity, T)
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_token_success() {
        let (status, body) = post(r#"{"channelName": "test-room"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        assert!(!token.is_empty());
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn test_generate_token_round_trip() {
        let (status, body) = post(
            r#"{"channelName": "room1", "uid": 42, "role": 1, "expirationTimeInSeconds": 3600}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let verified = verify(body["token"].as_str().unwrap(), "room1", UserIdentity::Uid(42));
        assert_eq!(verified.channel_name, "room1");
        assert_eq!(verified.role, Role::Publisher);
        assert_eq!(verified.privilege_expired_ts, T + 3600);
    }

    #[tokio::test]
    async fn test_defaults_match_explicit_values() {
        let (_, implicit) = post(r#"{"channelName": "room"}"#).await;
        let (_, explicit) = post(
            r#"{"channelName": "room", "uid": 0, "role": 1, "expirationTimeInSeconds": 3600}"#,
        )
        .await;

        let implicit = verify(implicit["token"].as_str().unwrap(), "room", UserIdentity::Uid(0));
        let explicit = verify(explicit["token"].as_str().unwrap(), "room", UserIdentity::Uid(0));

        assert_eq!(implicit.role, explicit.role);
        assert_eq!(implicit.identity, explicit.identity);
        assert_eq!(implicit.privilege_expired_ts, explicit.privilege_expired_ts);
        assert_eq!(implicit.privileges, explicit.privileges);
    }

    #[tokio::test]
    async fn test_missing_channel_name() {
        for body in [r#"{}"#, "null", r#"{"channelName": ""}"#, r#"{"channelName": "   "}"#] {
            let (status, json) = post(body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
            assert_eq!(json, serde_json::json!({"error": "Channel name is required"}));
        }
    }

    #[tokio::test]
    async fn test_signing_failure_is_server_error() {
        let (status, json) =
            post(r#"{"channelName": "room", "expirationTimeInSeconds": 0}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json["error"].as_str().unwrap().contains("must be after issue time"));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let (status, json) = post("{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON syntax"));
    }

    #[tokio::test]
    async fn test_negative_uid_rejected() {
        let (status, json) = post(r#"{"channelName": "room", "uid": -1}"#).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON data"));
    }

    #[tokio::test]
    async fn test_response_is_not_cacheable() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/generate-token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"channelName": "room"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let cache_control = response.headers().get(header::CACHE_CONTROL).unwrap();

        assert!(cache_control.to_str().unwrap().contains("no-store"));
    }
}
