//! Biometric unlock gate.
//!
//! Both operations answer with a plain boolean; platform errors are logged
//! and reported as `false`.

use async_trait::async_trait;

#[async_trait]
pub trait BiometricGate: Send + Sync {
    /// Hardware present and at least one biometric enrolled
    async fn is_supported(&self) -> bool;

    /// Show the system prompt; `true` only on a successful match
    async fn authenticate(&self, prompt: &str) -> bool;
}

/// Gate for hosts without a biometric sensor, such as a terminal session
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBiometricHardware;

#[async_trait]
impl BiometricGate for NoBiometricHardware {
    async fn is_supported(&self) -> bool {
        false
    }

    async fn authenticate(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, "Biometric prompt requested without hardware");
        false
    }
}
