//! Login and session-introspection calls. Paths stay centralized here; the
//! server remains the authority on whether a token is actually valid.

use crate::api::ApiClient;
use crate::auth::token::TokenStore;
use crate::errors::ApiError;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// The authenticated account, as reported by the API.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
}

/// Exchanges credentials for a bearer token and persists it.
///
/// # Errors
///
/// Returns an error if the login call fails or the token cannot be stored.
pub async fn login(
    api: &ApiClient,
    tokens: &TokenStore,
    credentials: &Credentials,
) -> Result<(), ApiError> {
    let response: TokenResponse = api.post("/login", credentials).await?;
    tokens
        .set(SecretString::from(response.token))
        .map_err(|err| ApiError::Config(format!("failed to persist session token: {err}")))?;
    Ok(())
}

/// Live token validation: a real round-trip, not a presence check.
pub async fn current_user(api: &ApiClient) -> Result<UserProfile, ApiError> {
    api.get("/user").await
}
