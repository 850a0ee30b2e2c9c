//! Local checks run before any call to the identity provider.

use intake_core::validators::is_valid_email;

use crate::error::AuthError;

const MIN_PASSWORD_LEN: usize = 6;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";
const INVALID_EMAIL: &str = "Please enter a valid email address";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(AuthError::invalid(FILL_ALL_FIELDS));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Checks run in order; the first failure is reported.
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(AuthError::invalid(FILL_ALL_FIELDS));
        }
        if self.password != self.confirm_password {
            return Err(AuthError::invalid("Passwords do not match"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::invalid(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(AuthError::invalid(INVALID_EMAIL));
        }
        Ok(())
    }

    /// Profile display name, "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetForm {
    pub email: String,
}

impl ResetForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.is_empty() {
            return Err(AuthError::invalid("Please enter your email address"));
        }
        if !is_valid_email(&self.email) {
            return Err(AuthError::invalid(INVALID_EMAIL));
        }
        Ok(())
    }
}
