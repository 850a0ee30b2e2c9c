//! Sign-in, registration and biometric unlock for the intake tools.

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod error;

pub mod biometric;
pub mod flow;
pub mod forms;
pub mod provider;
pub mod storage;

pub use biometric::{BiometricGate, NoBiometricHardware};
pub use error::{AuthError, StorageError};
pub use flow::{AuthFlow, BiometricStatus};
pub use forms::{LoginForm, RegisterForm, ResetForm};
pub use provider::{AuthProvider, IdentityToolkitProvider};
pub use storage::{SavedCredentials, Session, SessionStore, StoredState};
