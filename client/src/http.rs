//! reqwest implementation of [`RestaurantApi`] and [`AdminApi`].
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation      | Request                                              |
//! |----------------|------------------------------------------------------|
//! | create         | `POST {restaurants}` with the camelCase payload       |
//! | list           | `GET {restaurants}?sort_by=..&order=..`              |
//! | list_fallback  | `GET {fallback}` (no parameters)                     |
//! | get            | `GET {restaurants}/{id}`                             |
//! | update         | `PUT {restaurants}/{id}`                             |
//! | delete         | `DELETE {restaurants}/{id}`                          |
//! | admin          | `GET {admin}/restaurants`, `GET {admin}/database-stats`, `DELETE {admin}/restaurants/{id}` |

use async_trait::async_trait;
use intake_core::gateway::ListResponse;
use intake_core::{
    AdminApi, AdminSnapshot, ApiConfig, CreatedRestaurant, DatabaseStats, IntakeError,
    RecordPayload, RestaurantApi, RestaurantRecord, Result, SortSpec,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error body shapes the functions deployment answers with
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.detail.or(self.error).or(self.message)
    }
}

/// Restaurant API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpRestaurantClient {
    client: reqwest::Client,
    api: ApiConfig,
    bearer_token: Option<String>,
}

impl HttpRestaurantClient {
    /// Build a client with the configured per-request timeout
    pub fn new(api: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(api.timeout())
            .build()
            .map_err(|e| IntakeError::config_with_source("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            api,
            bearer_token: None,
        })
    }

    /// Send `Authorization: Bearer <token>` on every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.api
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| IntakeError::network_with_source(format!("{what} failed"), e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or(body);
        tracing::warn!(status = status.as_u16(), %detail, "{what} rejected");
        Err(IntakeError::http_status(status.as_u16(), format!("{what}: HTTP {status}: {detail}")))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        what: &str,
    ) -> Result<T> {
        let response = self.send(builder, what).await?;
        response.json::<T>().await.map_err(|e| {
            IntakeError::network_with_source(format!("{what}: unexpected response body"), e)
        })
    }

    async fn fetch_list(
        &self,
        builder: RequestBuilder,
        what: &str,
    ) -> Result<Vec<RestaurantRecord>> {
        let list: ListResponse = self.send_json(builder, what).await?;
        Ok(list.into_records())
    }
}

#[async_trait]
impl RestaurantApi for HttpRestaurantClient {
    async fn create(&self, payload: &RecordPayload) -> Result<CreatedRestaurant> {
        let url = self.api.restaurants_url();
        tracing::debug!(%url, key = %payload.restaurant_key, "POST restaurant");
        self.send_json(self.request(Method::POST, &url).json(payload), "create restaurant")
            .await
    }

    async fn list(&self, sort: SortSpec) -> Result<Vec<RestaurantRecord>> {
        let url = self.api.restaurants_url();
        tracing::debug!(%url, %sort, "GET restaurants");
        let builder = self
            .request(Method::GET, &url)
            .query(&sort.query_params());
        self.fetch_list(builder, "list restaurants").await
    }

    async fn list_fallback(&self) -> Result<Vec<RestaurantRecord>> {
        let url = self.api.fallback_url();
        tracing::debug!(%url, "GET restaurants (fallback)");
        self.fetch_list(self.request(Method::GET, &url), "list restaurants (fallback)")
            .await
    }

    async fn get(&self, id: &str) -> Result<RestaurantRecord> {
        let url = self.api.restaurant_url(id)?;
        self.send_json(self.request(Method::GET, &url), "get restaurant")
            .await
    }

    async fn update(&self, id: &str, payload: &RecordPayload) -> Result<()> {
        let url = self.api.restaurant_url(id)?;
        tracing::debug!(%url, "PUT restaurant");
        self.send(self.request(Method::PUT, &url).json(payload), "update restaurant")
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.api.restaurant_url(id)?;
        tracing::debug!(%url, "DELETE restaurant");
        self.send(self.request(Method::DELETE, &url), "delete restaurant")
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AdminApi for HttpRestaurantClient {
    async fn admin_restaurants(&self) -> Result<AdminSnapshot> {
        let url = self.api.admin_url("restaurants");
        self.send_json(self.request(Method::GET, &url), "load admin restaurants")
            .await
    }

    async fn database_stats(&self) -> Result<DatabaseStats> {
        let url = self.api.admin_url("database-stats");
        self.send_json(self.request(Method::GET, &url), "load database stats")
            .await
    }

    async fn admin_delete(&self, id: &str) -> Result<()> {
        let url = self.api.admin_restaurant_url(id)?;
        self.send(self.request(Method::DELETE, &url), "admin delete restaurant")
            .await?;
        Ok(())
    }
}
