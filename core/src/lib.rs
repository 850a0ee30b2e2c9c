//! Restaurant intake core.
//!
//! Field validation, restaurant key derivation, payload assembly, the
//! entry submission flow, the list engine and the admin dashboard state.
//! Network access goes through the [`gateway::RestaurantApi`] and
//! [`gateway::AdminApi`] traits; `intake-client` implements them over HTTP.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod assembler;
pub mod config;
pub mod errors;
pub mod form;
pub mod gateway;
pub mod key;
pub mod list;
pub mod record;
pub mod stats;
pub mod submission;
pub mod validators;

pub use assembler::{RecordPayload, build_submission_payload, build_update_payload};
pub use config::{ApiConfig, AuthConfig, IntakeConfig, SessionConfig};
pub use errors::{
    ErrorCategory, FieldIssue, FormField, IntakeError, IssueKind, Result, ValidationErrors,
};
pub use form::RestaurantForm;
pub use gateway::{
    AdminApi, AdminSnapshot, CreatedRestaurant, DatabaseStats, RestaurantApi, SortField,
    SortOrder, SortSpec,
};
pub use key::generate_restaurant_key;
pub use list::{FetchSource, FetchTrigger, ListController, ListState};
pub use record::RestaurantRecord;
pub use stats::{AdminDashboard, PendingDelete, RestaurantStats};
pub use submission::{EntryFlow, NextAction, NextStep, SubmissionState};
