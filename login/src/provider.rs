//! Identity provider
//!
//! Email/password accounts over an Identity Toolkit style REST API:
//! 1. `POST {endpoint}/accounts:signInWithPassword?key=..`
//! 2. `POST {endpoint}/accounts:signUp?key=..`, then `accounts:update` to
//!    set the display name
//! 3. `POST {endpoint}/accounts:sendOobCode?key=..` with
//!    `requestType = PASSWORD_RESET`

use async_trait::async_trait;
use chrono::Utc;
use intake_core::AuthConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::forms::RegisterForm;
use crate::storage::Session;

/// Account operations the login flows rely on
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Create the account and set its display name
    async fn register(&self, form: &RegisterForm) -> Result<Session, AuthError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

/// Error envelope: `{"error": {"code": 400, "message": "EMAIL_NOT_FOUND"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProfileUpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
}

impl AccountResponse {
    fn into_session(self, fallback_email: &str) -> Session {
        Session {
            user_id: self.local_id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            display_name: self.display_name.filter(|n| !n.is_empty()),
            signed_in_at: Utc::now(),
        }
    }
}

/// Human readable text for provider error codes
fn describe(code: &str) -> String {
    // Codes may carry a suffix, e.g. "WEAK_PASSWORD : Password should be ..."
    let base = code.split(':').next().unwrap_or(code).trim();
    match base {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            "Invalid email or password".to_string()
        }
        "USER_DISABLED" => "This account has been disabled".to_string(),
        "EMAIL_EXISTS" => "An account with this email already exists".to_string(),
        "WEAK_PASSWORD" => "Password must be at least 6 characters".to_string(),
        "INVALID_EMAIL" => "Please enter a valid email address".to_string(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later".to_string(),
        _ => code.to_string(),
    }
}

/// REST client for the identity toolkit
#[derive(Debug, Clone)]
pub struct IdentityToolkitProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl IdentityToolkitProvider {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    /// Build URL for an `accounts:<method>` call
    fn endpoint_url(&self, method: &str) -> String {
        format!("{}/accounts:{method}", self.endpoint)
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, AuthError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(method);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
                let code = envelope.error.message;
                tracing::warn!(method, %code, "Identity provider rejected request");
                return Err(AuthError::Rejected {
                    message: describe(&code),
                    code,
                });
            }
            return Err(AuthError::Network(format!("HTTP {status}: {body}")));
        }

        serde_json::from_str::<T>(&body).map_err(|e| AuthError::Parse(e.to_string()))
    }
}

#[async_trait]
impl AuthProvider for IdentityToolkitProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let account: AccountResponse = self.call("signInWithPassword", &request).await?;
        tracing::info!(user_id = %account.local_id, "Signed in");
        Ok(account.into_session(email))
    }

    async fn register(&self, form: &RegisterForm) -> Result<Session, AuthError> {
        let request = PasswordRequest {
            email: &form.email,
            password: &form.password,
            return_secure_token: true,
        };
        let account: AccountResponse = self.call("signUp", &request).await?;
        let mut session = account.into_session(&form.email);

        let display_name = form.display_name();
        let update = ProfileUpdateRequest {
            id_token: &session.id_token,
            display_name: &display_name,
            return_secure_token: false,
        };
        // The account exists at this point; a failed profile update is not
        // worth failing the registration over.
        match self.call::<_, serde_json::Value>("update", &update).await {
            Ok(_) => session.display_name = Some(display_name),
            Err(e) => tracing::warn!(error = %e, "Failed to set display name"),
        }

        tracing::info!(user_id = %session.user_id, "Account created");
        Ok(session)
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let request = OobCodeRequest {
            request_type: "PASSWORD_RESET",
            email,
        };
        let _: serde_json::Value = self.call("sendOobCode", &request).await?;
        tracing::info!("Password reset email requested");
        Ok(())
    }
}
