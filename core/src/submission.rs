//! Restaurant entry submission flow.
//!
//! ```text
//! Idle ──submit (valid)──▶ Submitting ──ok──▶ SucceededPromptingNext
//!   ▲                          │                    │
//!   │                          └──err──▶ Failed     ├─AddAnother─▶ Idle (form cleared)
//!   └──────── dismiss / retry ◀────────────┘        └─Done───────▶ Idle (leave form)
//! ```
//!
//! Validation failures leave the state untouched and never reach the
//! gateway. A failed create keeps the form so the user can resubmit; nothing
//! is retried automatically.

use chrono::{DateTime, Utc};

use crate::assembler::{RecordPayload, build_submission_payload};
use crate::errors::{IntakeError, Result};
use crate::form::RestaurantForm;
use crate::gateway::{CreatedRestaurant, RestaurantApi};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    SucceededPromptingNext {
        id: String,
        restaurant_key: String,
        restaurant_name: String,
    },
    Failed {
        message: String,
    },
}

/// Choice offered after a successful save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    AddAnother,
    Done,
}

/// Where the UI should go after a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    StayOnForm,
    LeaveForm,
}

/// Entry form plus its submission state
#[derive(Debug, Default)]
pub struct EntryFlow {
    form: RestaurantForm,
    state: SubmissionState,
    created_by: Option<String>,
}

impl EntryFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-filled form
    pub fn with_form(form: RestaurantForm) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    /// Record the signed-in user id on created records
    pub fn created_by(mut self, user_id: impl Into<String>) -> Self {
        self.created_by = Some(user_id.into());
        self
    }

    pub fn form(&self) -> &RestaurantForm {
        &self.form
    }

    /// Edit access to the form. Only meaningful while not submitting.
    pub fn form_mut(&mut self) -> &mut RestaurantForm {
        &mut self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Validate and assemble the payload, moving to `Submitting`.
    ///
    /// Allowed from `Idle` and `Failed` (a manual resubmit).
    pub fn begin_submit<F>(&mut self, now: F) -> Result<RecordPayload>
    where
        F: FnOnce() -> DateTime<Utc>,
    {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed { .. } => {}
            SubmissionState::Submitting => {
                return Err(IntakeError::internal("a submission is already in flight"));
            }
            SubmissionState::SucceededPromptingNext { .. } => {
                return Err(IntakeError::internal(
                    "choose the next action before submitting again",
                ));
            }
        }

        if let Err(errors) = self.form.validate() {
            tracing::debug!(issues = errors.issues().len(), "Form rejected locally");
            return Err(errors.into());
        }

        let payload = build_submission_payload(&self.form, now, self.created_by.as_deref());
        tracing::info!(restaurant_key = %payload.restaurant_key, "Submitting restaurant");
        self.state = SubmissionState::Submitting;
        Ok(payload)
    }

    /// Record the gateway result of the in-flight submission.
    pub fn finish_submit(
        &mut self,
        payload: &RecordPayload,
        result: Result<CreatedRestaurant>,
    ) -> &SubmissionState {
        if self.state != SubmissionState::Submitting {
            tracing::warn!(state = ?self.state, "Ignoring submission result outside Submitting");
            return &self.state;
        }

        self.state = match result {
            Ok(created) => {
                tracing::info!(id = %created.id, "Restaurant saved");
                SubmissionState::SucceededPromptingNext {
                    id: created.id,
                    restaurant_key: created
                        .restaurant_key
                        .unwrap_or_else(|| payload.restaurant_key.clone()),
                    restaurant_name: payload.restaurant_name.clone(),
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "Error saving restaurant");
                SubmissionState::Failed {
                    message: err.user_message(),
                }
            }
        };
        &self.state
    }

    /// Answer the post-save prompt
    pub fn choose(&mut self, action: NextAction) -> Result<NextStep> {
        if !matches!(self.state, SubmissionState::SucceededPromptingNext { .. }) {
            return Err(IntakeError::internal("no saved restaurant awaiting a choice"));
        }
        self.state = SubmissionState::Idle;
        Ok(match action {
            NextAction::AddAnother => {
                self.form.clear();
                NextStep::StayOnForm
            }
            NextAction::Done => NextStep::LeaveForm,
        })
    }

    /// Close the failure notice, keeping the form as typed
    pub fn dismiss_failure(&mut self) {
        if matches!(self.state, SubmissionState::Failed { .. }) {
            self.state = SubmissionState::Idle;
        }
    }

    /// Validate, create and record the result in one step.
    ///
    /// Validation errors are returned without touching the gateway. Gateway
    /// errors land in `SubmissionState::Failed` and are returned as well.
    pub async fn submit<A, F>(&mut self, api: &A, now: F) -> Result<CreatedRestaurant>
    where
        A: RestaurantApi + ?Sized,
        F: FnOnce() -> DateTime<Utc>,
    {
        let payload = self.begin_submit(now)?;
        let result = api.create(&payload).await;
        let returned = result.clone();
        self.finish_submit(&payload, result);
        returned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap()
    }

    fn filled() -> EntryFlow {
        EntryFlow::with_form(RestaurantForm::new(
            "Tycoon Flats",
            "121 Main St",
            "Dallas",
            "TX",
            "75409",
            "2145550100",
        ))
    }

    fn created() -> CreatedRestaurant {
        CreatedRestaurant {
            id: "abc".to_string(),
            restaurant_key: None,
            message: None,
        }
    }

    #[test]
    fn test_invalid_form_stays_idle() {
        let mut flow = filled();
        flow.form_mut().zipcode = "1234".to_string();
        let err = flow.begin_submit(clock).unwrap_err();
        assert!(matches!(err, IntakeError::Validation(_)));
        assert_eq!(flow.state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_success_then_add_another_clears() {
        let mut flow = filled();
        let payload = flow.begin_submit(clock).unwrap();
        assert_eq!(flow.state(), &SubmissionState::Submitting);

        flow.finish_submit(&payload, Ok(created()));
        assert_eq!(
            flow.state(),
            &SubmissionState::SucceededPromptingNext {
                id: "abc".to_string(),
                restaurant_key: "tycoonflats-121mainst-75409".to_string(),
                restaurant_name: "Tycoon Flats".to_string(),
            }
        );

        assert_eq!(flow.choose(NextAction::AddAnother).unwrap(), NextStep::StayOnForm);
        assert_eq!(flow.form(), &RestaurantForm::default());
        assert_eq!(flow.state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_done_keeps_form_and_leaves() {
        let mut flow = filled();
        let payload = flow.begin_submit(clock).unwrap();
        flow.finish_submit(&payload, Ok(created()));
        assert_eq!(flow.choose(NextAction::Done).unwrap(), NextStep::LeaveForm);
        assert_eq!(flow.form().restaurant_name, "Tycoon Flats");
    }

    #[test]
    fn test_failure_preserves_form_and_allows_resubmit() {
        let mut flow = filled();
        let payload = flow.begin_submit(clock).unwrap();
        flow.finish_submit(&payload, Err(IntakeError::http_status(500, "boom")));
        assert!(matches!(flow.state(), SubmissionState::Failed { .. }));
        assert_eq!(flow.form().zipcode, "75409");

        assert!(flow.begin_submit(clock).is_ok());
        assert_eq!(flow.state(), &SubmissionState::Submitting);
    }

    #[test]
    fn test_double_submit_rejected() {
        let mut flow = filled();
        flow.begin_submit(clock).unwrap();
        assert!(matches!(flow.begin_submit(clock), Err(IntakeError::Internal { .. })));
    }

    #[test]
    fn test_choose_requires_success() {
        let mut flow = filled();
        assert!(flow.choose(NextAction::Done).is_err());
    }

    #[test]
    fn test_dismiss_failure() {
        let mut flow = filled();
        let payload = flow.begin_submit(clock).unwrap();
        flow.finish_submit(&payload, Err(IntakeError::network("offline")));
        flow.dismiss_failure();
        assert_eq!(flow.state(), &SubmissionState::Idle);
    }
}
