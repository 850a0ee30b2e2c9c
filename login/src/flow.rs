//! Login flows tying the provider, the biometric gate and the session store
//! together.

use crate::biometric::BiometricGate;
use crate::error::AuthError;
use crate::forms::{LoginForm, RegisterForm, ResetForm};
use crate::provider::AuthProvider;
use crate::storage::{SavedCredentials, Session, SessionStore};

const ENABLE_PROMPT: &str = "Authenticate to enable biometric login";
const LOGIN_PROMPT: &str = "Authenticate with biometric";

/// Biometric settings as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiometricStatus {
    pub enabled: bool,
    pub supported: bool,
    pub has_saved_credentials: bool,
}

pub struct AuthFlow<P, B> {
    provider: P,
    biometric: B,
    store: SessionStore,
}

impl<P: AuthProvider, B: BiometricGate> AuthFlow<P, B> {
    pub fn new(provider: P, biometric: B, store: SessionStore) -> Self {
        Self {
            provider,
            biometric,
            store,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.store.session()?)
    }

    pub async fn biometric_status(&self) -> Result<BiometricStatus, AuthError> {
        let state = self.store.load()?;
        Ok(BiometricStatus {
            enabled: state.biometric_enabled,
            supported: self.biometric.is_supported().await,
            has_saved_credentials: state.credentials.is_some(),
        })
    }

    /// Turn biometric login on. Requires hardware support and a successful
    /// prompt; the flag is untouched otherwise.
    pub async fn enable_biometric(&self) -> Result<(), AuthError> {
        if !self.biometric.is_supported().await {
            return Err(AuthError::BiometricUnavailable);
        }
        if !self.biometric.authenticate(ENABLE_PROMPT).await {
            return Err(AuthError::BiometricRejected);
        }
        self.store.set_biometric_enabled(true)?;
        tracing::info!("Biometric login enabled");
        Ok(())
    }

    /// Turn biometric login off and drop the cached credentials
    pub fn disable_biometric(&self) -> Result<(), AuthError> {
        let mut state = self.store.load()?;
        state.biometric_enabled = false;
        state.credentials = None;
        self.store.save(&state)?;
        tracing::info!("Biometric login disabled");
        Ok(())
    }

    /// Email/password sign-in. Credentials are cached only while biometric
    /// login is enabled.
    pub async fn sign_in_with_password(&self, form: &LoginForm) -> Result<Session, AuthError> {
        form.validate()?;
        let session = self.provider.sign_in(&form.email, &form.password).await?;

        let mut state = self.store.load()?;
        if state.biometric_enabled {
            tracing::debug!("Storing credentials for biometric login");
            state.credentials = Some(SavedCredentials {
                email: form.email.clone(),
                password: form.password.clone(),
            });
        }
        state.session = Some(session.clone());
        self.store.save(&state)?;
        Ok(session)
    }

    /// Sign in with the cached credentials after a biometric match
    pub async fn sign_in_with_biometric(&self) -> Result<Session, AuthError> {
        let state = self.store.load()?;
        if !state.biometric_enabled {
            return Err(AuthError::BiometricDisabled);
        }
        if !self.biometric.is_supported().await {
            return Err(AuthError::BiometricUnavailable);
        }
        if !self.biometric.authenticate(LOGIN_PROMPT).await {
            return Err(AuthError::BiometricRejected);
        }
        let Some(credentials) = state.credentials else {
            return Err(AuthError::NoSavedCredentials);
        };

        let session = self
            .provider
            .sign_in(&credentials.email, &credentials.password)
            .await?;
        self.store.set_session(session.clone())?;
        Ok(session)
    }

    /// Create an account and sign it in
    pub async fn register(&self, form: &RegisterForm) -> Result<Session, AuthError> {
        form.validate()?;
        let session = self.provider.register(form).await?;
        self.store.set_session(session.clone())?;
        Ok(session)
    }

    pub async fn send_password_reset(&self, form: &ResetForm) -> Result<(), AuthError> {
        form.validate()?;
        self.provider.send_password_reset(&form.email).await
    }

    /// Clear the session. The biometric flag and cached credentials stay so
    /// the next biometric sign-in still works.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear_session()?;
        tracing::info!("Signed out");
        Ok(())
    }
}
