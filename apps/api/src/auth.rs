//! Caller authentication — delegated to the managed auth provider.
//!
//! Every pipeline route costs an external model call, so tokens are verified
//! BEFORE any other work: no valid token, no spend. The verifier is a trait
//! object so tests can swap in a stub without a provider round trip.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Resolves a bearer token to the caller's user id, or `Unauthorized`.
    async fn verify(&self, token: &str) -> Result<Uuid, AppError>;
}

/// Production verifier: asks the auth provider's verify endpoint.
pub struct RemoteTokenVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl RemoteTokenVerifier {
    pub fn new(verify_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            verify_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    user_id: Uuid,
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let response = self
            .client
            .post(&self.verify_url)
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Auth provider unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        let verified: VerifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Bad auth provider response: {e}")))?;

        Ok(verified.user_id)
    }
}

/// Extractor for authenticated routes. Pulls the bearer token and resolves it
/// through the verifier in `AppState`.
pub struct AuthedUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AppError::Unauthorized)?;

        let user_id = state.verifier.verify(token).await?;
        Ok(AuthedUser(user_id))
    }
}
