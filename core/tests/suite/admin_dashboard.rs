use intake_core::AdminDashboard;
use pretty_assertions::assert_eq;

use super::fake_api::{FakeApi, record};

#[tokio::test]
async fn load_sorts_by_name_and_computes_stats() {
    let api = FakeApi::with_records(vec![
        record("1", "Zeta Grill", "Dallas", "TX"),
        record("2", "alpha bistro", "Austin", "TX"),
    ]);
    let mut dashboard = AdminDashboard::new();
    dashboard.load(&api).await.unwrap();

    let names: Vec<_> = dashboard.restaurants().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["alpha bistro", "Zeta Grill"]);
    assert_eq!(dashboard.stats().total_count, 2);
    assert_eq!(dashboard.stats().cities, vec!["Austin", "Dallas"]);
    assert_eq!(dashboard.stats().states_covered, 1);
    assert_eq!(dashboard.db_stats().collection_stats["restaurants"], 2);
}

#[tokio::test]
async fn delete_requires_confirmation_and_reloads() {
    let api = FakeApi::with_records(vec![
        record("1", "Zeta Grill", "Dallas", "TX"),
        record("2", "alpha bistro", "Austin", "TX"),
    ]);
    let mut dashboard = AdminDashboard::new();
    dashboard.load(&api).await.unwrap();

    let prompt = dashboard.request_delete("1").prompt();
    assert!(prompt.contains("Zeta Grill"));
    assert!(api.calls.lock().unwrap().deletes.is_empty());

    dashboard.cancel_delete();
    assert!(dashboard.confirm_delete(&api).await.is_err());
    assert!(api.calls.lock().unwrap().deletes.is_empty());

    dashboard.request_delete("1");
    dashboard.confirm_delete(&api).await.unwrap();
    assert_eq!(api.calls.lock().unwrap().deletes, vec!["1".to_string()]);
    assert_eq!(dashboard.restaurants().len(), 1);
    assert_eq!(dashboard.stats().total_count, 1);
    assert!(dashboard.pending_delete().is_none());
}

#[tokio::test]
async fn unknown_id_is_staged_under_its_id() {
    let api = FakeApi::default();
    let mut dashboard = AdminDashboard::new();
    dashboard.load(&api).await.unwrap();

    let pending = dashboard.request_delete("missing").clone();
    assert_eq!(pending.name, "missing");
    assert!(pending.prompt().contains("\"missing\""));

    let err = dashboard.confirm_delete(&api).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(api.calls.lock().unwrap().deletes, vec!["missing".to_string()]);
}

#[tokio::test]
async fn delete_works_without_a_loaded_dashboard() {
    let api = FakeApi {
        fail_db_stats: true,
        ..FakeApi::with_records(vec![
            record("1", "Zeta Grill", "Dallas", "TX"),
            record("2", "alpha bistro", "Austin", "TX"),
        ])
    };
    let mut dashboard = AdminDashboard::new();
    assert!(dashboard.load(&api).await.is_err());

    let pending = dashboard.request_delete("1").clone();
    assert_eq!(pending.name, "1");
    dashboard.confirm_delete(&api).await.unwrap();

    assert_eq!(api.calls.lock().unwrap().deletes, vec!["1".to_string()]);
    assert_eq!(api.records.lock().unwrap().len(), 1);
    assert!(dashboard.pending_delete().is_none());
}
