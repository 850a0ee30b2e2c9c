use chrono::{DateTime, TimeZone, Utc};
use intake_core::{
    EntryFlow, FormField, IntakeError, IssueKind, NextAction, NextStep, RestaurantForm,
    SubmissionState,
};
use pretty_assertions::assert_eq;

use super::fake_api::FakeApi;

fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).single().unwrap()
}

fn tycoon_flats(zipcode: &str) -> RestaurantForm {
    RestaurantForm::new(
        "Tycoon Flats",
        "121 Main St",
        "Dallas",
        "TX",
        zipcode,
        "(214)555-0100",
    )
}

#[tokio::test]
async fn invalid_zipcode_never_reaches_the_gateway() {
    let api = FakeApi::default();
    let mut flow = EntryFlow::with_form(tycoon_flats("1234"));

    let err = flow.submit(&api, clock).await.unwrap_err();
    let IntakeError::Validation(errors) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(errors.issues().iter().any(|issue| {
        issue.field == FormField::Zipcode && issue.kind == IssueKind::InvalidZipcode
    }));
    assert_eq!(api.create_calls(), 0);
    assert_eq!(flow.state(), &SubmissionState::Idle);
}

#[tokio::test]
async fn valid_form_is_submitted_once_with_derived_key() {
    let api = FakeApi::default();
    let mut flow = EntryFlow::with_form(tycoon_flats("75409")).created_by("user-1");

    let created = flow.submit(&api, clock).await.unwrap();
    assert_eq!(created.id, "id-1");
    assert_eq!(api.create_calls(), 1);

    let calls = api.calls.lock().unwrap();
    let payload = &calls.create[0];
    assert_eq!(payload.restaurant_key, "tycoonflats-121mainst-75409");
    assert_eq!(payload.address, "121 Main St, Dallas, TX 75409");
    assert_eq!(payload.created_at, payload.updated_at);
    assert_eq!(payload.created_at, "2025-03-14T09:30:00.000Z");
    assert_eq!(payload.created_by.as_deref(), Some("user-1"));
    drop(calls);

    assert!(matches!(flow.state(), SubmissionState::SucceededPromptingNext { .. }));
    assert_eq!(
        flow.choose(NextAction::AddAnother).unwrap(),
        NextStep::StayOnForm
    );
    assert_eq!(flow.form(), &RestaurantForm::default());
}

#[tokio::test]
async fn gateway_failure_keeps_the_form() {
    let api = FakeApi {
        fail_create: true,
        ..FakeApi::default()
    };
    let mut flow = EntryFlow::with_form(tycoon_flats("75409-1234"));

    let err = flow.submit(&api, clock).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(matches!(flow.state(), SubmissionState::Failed { .. }));
    assert_eq!(flow.form().zipcode, "75409-1234");
    assert_eq!(api.create_calls(), 1);
}
