//! Contract with the remote restaurant API.
//!
//! The core only depends on these traits. `intake-client` provides the HTTP
//! implementation; tests use in-memory fakes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::assembler::RecordPayload;
use crate::errors::{IntakeError, Result};
use crate::record::RestaurantRecord;
use crate::stats::RestaurantStats;

/// Sortable list columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    RestaurantName,
}

impl SortField {
    /// Value of the `sort_by` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::RestaurantName => "restaurant_name",
        }
    }
}

impl FromStr for SortField {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "created_at" | "created" | "date" => Ok(Self::CreatedAt),
            "restaurant_name" | "name" => Ok(Self::RestaurantName),
            other => Err(IntakeError::config(format!("unknown sort field: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Value of the `order` query parameter
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(IntakeError::config(format!("unknown sort order: {other}"))),
        }
    }
}

/// Active sort column and direction. Newest first by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Selecting the active column flips its order; a new column starts
    /// descending.
    pub fn toggled(self, field: SortField) -> Self {
        if self.field == field {
            Self {
                field,
                order: self.order.flipped(),
            }
        } else {
            Self {
                field,
                order: SortOrder::Desc,
            }
        }
    }

    /// `[("sort_by", ..), ("order", ..)]`
    pub fn query_params(self) -> [(&'static str, &'static str); 2] {
        [
            ("sort_by", self.field.as_param()),
            ("order", self.order.as_param()),
        ]
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.as_param(), self.order.as_param())
    }
}

/// List endpoints answer with either a bare array or `{ "restaurants": [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Bare(Vec<RestaurantRecord>),
    Wrapped {
        #[serde(default)]
        restaurants: Vec<RestaurantRecord>,
    },
}

impl ListResponse {
    pub fn into_records(self) -> Vec<RestaurantRecord> {
        match self {
            Self::Bare(records) => records,
            Self::Wrapped { restaurants } => restaurants,
        }
    }
}

/// Successful create response. Only the identifier is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRestaurant {
    #[serde(alias = "_id", alias = "insertedId")]
    pub id: String,
    #[serde(default, alias = "restaurantKey")]
    pub restaurant_key: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Admin listing with server-side aggregates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminSnapshot {
    #[serde(default)]
    pub restaurants: Vec<RestaurantRecord>,
    #[serde(default)]
    pub stats: Option<RestaurantStats>,
}

impl AdminSnapshot {
    /// Server stats, or stats computed from the records when absent
    pub fn stats_or_computed(&self) -> RestaurantStats {
        self.stats
            .clone()
            .unwrap_or_else(|| RestaurantStats::from_records(&self.restaurants))
    }
}

/// Document counts per collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub collection_stats: BTreeMap<String, u64>,
    #[serde(default)]
    pub total_collections: usize,
}

/// Restaurant CRUD over the remote API
#[async_trait]
pub trait RestaurantApi: Send + Sync {
    /// Persist a new restaurant. Not idempotent.
    async fn create(&self, payload: &RecordPayload) -> Result<CreatedRestaurant>;

    /// Fetch all restaurants, ordered by the server according to `sort`
    async fn list(&self, sort: SortSpec) -> Result<Vec<RestaurantRecord>>;

    /// Fetch from the fixed fallback endpoint, without parameters
    async fn list_fallback(&self) -> Result<Vec<RestaurantRecord>>;

    async fn get(&self, id: &str) -> Result<RestaurantRecord>;

    async fn update(&self, id: &str, payload: &RecordPayload) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Admin dashboard endpoints
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn admin_restaurants(&self) -> Result<AdminSnapshot>;

    async fn database_stats(&self) -> Result<DatabaseStats>;

    async fn admin_delete(&self, id: &str) -> Result<()>;
}
