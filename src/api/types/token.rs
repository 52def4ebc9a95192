//! Token endpoint request and response bodies

use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::domain::token::CHANNEL_NAME_REQUIRED;
use crate::domain::{Role, TokenRequest, UserIdentity};

/// Body of `POST /generate-token`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTokenRequest {
    pub channel_name: Option<String>,
    pub uid: Option<u32>,
    pub user_account: Option<String>,
    pub role: Option<Role>,
    pub expiration_time_in_seconds: Option<i64>,
}

impl GenerateTokenRequest {
    /// Apply request defaults; a missing or blank channel name is rejected here
    pub fn into_domain(self) -> Result<TokenRequest, ApiError> {
        let channel_name = self
            .channel_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request(CHANNEL_NAME_REQUIRED))?;

        let mut request = TokenRequest::new(channel_name)
            .with_identity(UserIdentity::from_parts(
                self.uid.unwrap_or(0),
                self.user_account,
            ))
            .with_role(self.role.unwrap_or_default());

        if let Some(secs) = self.expiration_time_in_seconds {
            request = request.with_expiration_secs(secs);
        }

        Ok(request)
    }
}

/// Successful response of `POST /generate-token`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateTokenResponse {
    pub token: String,
}
