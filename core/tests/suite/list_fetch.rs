use intake_core::list::run_fetch;
use intake_core::{
    FetchSource, FetchTrigger, ListController, ListState, SortField, SortOrder, SortSpec,
};
use pretty_assertions::assert_eq;

use super::fake_api::{FakeApi, record};

fn seeded() -> Vec<intake_core::RestaurantRecord> {
    vec![
        record("1", "Zeta Grill", "Dallas", "TX"),
        record("2", "alpha bistro", "Austin", "TX"),
        record("3", "Mid Cafe", "Tulsa", "OK"),
    ]
}

#[tokio::test]
async fn mount_loads_from_primary_with_default_sort() {
    let api = FakeApi::with_records(seeded());
    let mut list = ListController::new();

    let state = list.load(&api, FetchTrigger::Mount).await;
    assert_eq!(state, ListState::Loaded(FetchSource::Primary));
    assert_eq!(list.records().len(), 3);
    assert_eq!(
        api.calls.lock().unwrap().list,
        vec![SortSpec::new(SortField::CreatedAt, SortOrder::Desc)]
    );
    assert_eq!(api.fallback_calls(), 0);
}

#[tokio::test]
async fn primary_failure_falls_back_once() {
    let api = FakeApi {
        fail_primary: true,
        ..FakeApi::with_records(seeded())
    };
    let mut list = ListController::new();

    let state = list.load(&api, FetchTrigger::Mount).await;
    assert_eq!(state, ListState::Loaded(FetchSource::Fallback));
    assert_eq!(list.records().len(), 3);
    assert_eq!(api.fallback_calls(), 1);
}

#[tokio::test]
async fn both_failures_leave_an_empty_failed_list() {
    let api = FakeApi {
        fail_primary: true,
        fail_fallback: true,
        ..FakeApi::with_records(seeded())
    };
    let mut list = ListController::new();
    list.load(&api, FetchTrigger::Mount).await;
    assert_eq!(list.state(), ListState::Failed);
    assert!(list.records().is_empty());
    assert!(list.last_error().is_some());
    assert_eq!(api.fallback_calls(), 1);
}

#[tokio::test]
async fn sort_toggle_refetches_and_search_filters_locally() {
    let api = FakeApi::with_records(seeded());
    let mut list = ListController::new();
    list.load(&api, FetchTrigger::Mount).await;

    let request = list.select_sort(SortField::RestaurantName);
    assert_eq!(
        request.sort,
        SortSpec::new(SortField::RestaurantName, SortOrder::Desc)
    );
    let outcome = run_fetch(&api, request).await;
    assert!(list.apply(outcome));

    let request = list.select_sort(SortField::RestaurantName);
    assert_eq!(request.sort.order, SortOrder::Asc);
    let outcome = run_fetch(&api, request).await;
    assert!(list.apply(outcome));

    let names: Vec<_> = list.records().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["alpha bistro", "Mid Cafe", "Zeta Grill"]);

    let list_calls = api.calls.lock().unwrap().list.len();
    list.set_search("tx");
    let visible: Vec<_> = list.visible().iter().map(|r| r.name()).collect();
    assert_eq!(visible, vec!["alpha bistro", "Zeta Grill"]);
    assert_eq!(api.calls.lock().unwrap().list.len(), list_calls);
}

#[tokio::test]
async fn superseded_and_unmounted_results_are_dropped() {
    let api = FakeApi::with_records(seeded());
    let mut list = ListController::new();

    let first = list.mount();
    let second = list.refresh();
    let stale = run_fetch(&api, first).await;
    assert!(!list.apply(stale));
    assert_eq!(list.state(), ListState::Loading);

    let fresh = run_fetch(&api, second).await;
    list.unmount();
    assert!(!list.apply(fresh));
    assert!(list.records().is_empty());
    assert_eq!(list.state(), ListState::Idle);
}
