#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use intake_client::HttpRestaurantClient;
use intake_core::{
    AdminApi, AdminDashboard, ApiConfig, EntryFlow, FetchSource, FetchTrigger, ListController,
    ListState, RestaurantApi, RestaurantForm, SortField, SortOrder, SortSpec,
    build_submission_payload,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{
    body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COLLECTION: &str = "/api/restaurants/holding";

fn client_for(server: &MockServer) -> HttpRestaurantClient {
    HttpRestaurantClient::new(ApiConfig::with_base_url(server.uri())).unwrap()
}

fn form() -> RestaurantForm {
    RestaurantForm::new(
        "Tycoon Flats",
        "121 Main St",
        "Dallas",
        "TX",
        "75409",
        "214-555-0100",
    )
}

fn clock() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).single().unwrap()
}

#[tokio::test]
async fn create_posts_camel_case_payload_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .and(header("authorization", "Bearer id-token"))
        .and(body_partial_json(json!({
            "restaurantName": "Tycoon Flats",
            "streetAddress": "121 Main St",
            "address": "121 Main St, Dallas, TX 75409",
            "restaurantKey": "tycoonflats-121mainst-75409",
            "createdAt": "2025-03-14T09:30:00.000Z",
            "updatedAt": "2025-03-14T09:30:00.000Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": "doc-1",
            "restaurant_key": "tycoonflats-121mainst-75409",
            "message": "Restaurant saved successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_bearer_token("id-token");
    let payload = build_submission_payload(&form(), clock, None);
    let created = client.create(&payload).await.unwrap();
    assert_eq!(created.id, "doc-1");
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut bad = form();
    bad.zipcode = "1234".to_string();
    let mut flow = EntryFlow::with_form(bad);
    assert!(flow.submit(&client, clock).await.is_err());
}

#[tokio::test]
async fn list_sends_sort_params_and_accepts_wrapped_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("sort_by", "restaurant_name"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "restaurants": [
                {"_id": "a", "restaurant_name": "Alpha", "city": "Austin"},
                {"id": "b", "restaurantName": "Beta", "createdAt": "2025-01-01T00:00:00Z"}
            ],
            "count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client
        .list(SortSpec::new(SortField::RestaurantName, SortOrder::Asc))
        .await
        .unwrap();
    let names: Vec<_> = records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
    assert_eq!(records[0].id.as_deref(), Some("a"));
    assert_eq!(records[1].id.as_deref(), Some("b"));
}

#[tokio::test]
async fn controller_uses_fallback_when_primary_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("sort_by", "created_at"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/backup"))
        .and(query_param_is_missing("sort_by"))
        .and(query_param_is_missing("order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "1", "restaurant_name": "Only One"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig {
        fallback_url: Some(format!("{}/backup", server.uri())),
        ..ApiConfig::with_base_url(server.uri())
    };
    let client = HttpRestaurantClient::new(config).unwrap();
    let mut list = ListController::new();
    let state = list.load(&client, FetchTrigger::Mount).await;

    assert_eq!(state, ListState::Loaded(FetchSource::Fallback));
    assert_eq!(list.records().len(), 1);
}

#[tokio::test]
async fn default_fallback_is_the_collection_without_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param("sort_by", "restaurant_name"))
        .and(query_param("order", "asc"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .and(query_param_is_missing("sort_by"))
        .and(query_param_is_missing("order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "restaurants": [{"id": "1", "restaurant_name": "Only One"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut list = ListController::with_sort(SortSpec::new(
        SortField::RestaurantName,
        SortOrder::Asc,
    ));
    let state = list.load(&client_for(&server), FetchTrigger::Mount).await;

    assert_eq!(state, ListState::Loaded(FetchSource::Fallback));
    assert_eq!(list.records()[0].name(), "Only One");
}

#[tokio::test]
async fn controller_fails_with_empty_list_when_both_fail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(COLLECTION))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut list = ListController::new();
    let state = list.load(&client, FetchTrigger::Mount).await;
    assert_eq!(state, ListState::Failed);
    assert!(list.records().is_empty());
    assert_eq!(list.last_error().and_then(|e| e.status()), Some(503));
}

#[tokio::test]
async fn get_missing_reports_status_and_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{COLLECTION}/nope")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Restaurant not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get("nope").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Restaurant not found"));
}

#[tokio::test]
async fn malformed_body_is_a_network_error_without_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{COLLECTION}/x")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get("x").await.unwrap_err();
    assert!(matches!(err, intake_core::IntakeError::Network { status: None, .. }));
}

#[tokio::test]
async fn update_and_delete_hit_the_item_url() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("{COLLECTION}/doc-1")))
        .and(body_partial_json(json!({"restaurantName": "Tycoon Flats"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION}/doc-1")))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let payload = build_submission_payload(&form(), clock, None);
    client.update("doc-1", &payload).await.unwrap();
    client.delete("doc-1").await.unwrap();
}

#[tokio::test]
async fn item_ids_stay_inside_their_collection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION}/a%2Fb%3Fc")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/restaurants/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete("a/b?c").await.unwrap();
    client.delete("../../admin/restaurants/7").await.unwrap_err();
    assert!(client.delete("..").await.is_err());
}

#[tokio::test]
async fn admin_dashboard_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "restaurants": [
                {"id": "2", "restaurant_name": "Zeta", "city": "Dallas", "state": "TX"},
                {"id": "1", "restaurant_name": "Alpha", "state": "OK"}
            ],
            "stats": {
                "total_count": 2,
                "cities_covered": 2,
                "states_covered": 2,
                "cities": ["Dallas", "Unknown"],
                "states": ["OK", "TX"]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/database-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collections": ["restaurants"],
            "collection_stats": {"restaurants": 2},
            "total_collections": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/restaurants/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut dashboard = AdminDashboard::new();
    dashboard.load(&client).await.unwrap();
    assert_eq!(dashboard.restaurants()[0].name(), "Alpha");
    assert_eq!(dashboard.stats().cities, vec!["Dallas", "Unknown"]);
    assert_eq!(dashboard.db_stats().total_collections, 1);

    dashboard.request_delete("2");
    dashboard.confirm_delete(&client).await.unwrap();

    let snapshot = client.admin_restaurants().await.unwrap();
    assert_eq!(snapshot.restaurants.len(), 2);
}
