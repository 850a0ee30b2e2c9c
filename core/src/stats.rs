//! Admin dashboard aggregates and the delete-with-confirmation flow.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{IntakeError, Result};
use crate::gateway::{AdminApi, AdminSnapshot, DatabaseStats, SortField, SortOrder, SortSpec};
use crate::list::sort_records;
use crate::record::RestaurantRecord;

const UNKNOWN: &str = "Unknown";

/// Coverage numbers shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantStats {
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub cities_covered: usize,
    #[serde(default)]
    pub states_covered: usize,
    #[serde(default)]
    pub cities: Vec<String>,
    #[serde(default)]
    pub states: Vec<String>,
}

impl RestaurantStats {
    /// Count distinct cities and states; missing values count as "Unknown".
    pub fn from_records(records: &[RestaurantRecord]) -> Self {
        let label = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let cities: BTreeSet<String> = records.iter().map(|r| label(&r.city)).collect();
        let states: BTreeSet<String> = records.iter().map(|r| label(&r.state)).collect();

        Self {
            total_count: records.len(),
            cities_covered: cities.len(),
            states_covered: states.len(),
            cities: cities.into_iter().collect(),
            states: states.into_iter().collect(),
        }
    }
}

/// A delete the user asked for but has not confirmed yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

impl PendingDelete {
    /// Confirmation prompt text
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            self.name
        )
    }
}

/// Admin dashboard view state
#[derive(Debug, Default)]
pub struct AdminDashboard {
    restaurants: Vec<RestaurantRecord>,
    stats: RestaurantStats,
    db_stats: DatabaseStats,
    pending: Option<PendingDelete>,
}

impl AdminDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch restaurants and database stats. Both must succeed.
    pub async fn load<A: AdminApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let snapshot: AdminSnapshot = api.admin_restaurants().await?;
        let db_stats = api.database_stats().await?;

        self.stats = snapshot.stats_or_computed();
        self.restaurants = snapshot.restaurants;
        sort_records(
            &mut self.restaurants,
            SortSpec::new(SortField::RestaurantName, SortOrder::Asc),
        );
        self.db_stats = db_stats;

        tracing::info!(
            restaurants = self.restaurants.len(),
            collections = self.db_stats.total_collections,
            "Admin data loaded"
        );
        Ok(())
    }

    /// Restaurants sorted by name, ascending
    pub fn restaurants(&self) -> &[RestaurantRecord] {
        &self.restaurants
    }

    pub fn stats(&self) -> &RestaurantStats {
        &self.stats
    }

    pub fn db_stats(&self) -> &DatabaseStats {
        &self.db_stats
    }

    /// Stage a delete for confirmation. The prompt names the restaurant when
    /// it is among the loaded records and falls back to the id otherwise, so
    /// a partial or failed load never blocks a delete.
    pub fn request_delete(&mut self, id: &str) -> &PendingDelete {
        let name = self
            .restaurants
            .iter()
            .find(|r| r.id.as_deref() == Some(id))
            .map_or_else(|| id.to_string(), |r| r.name().to_string());

        self.pending.insert(PendingDelete {
            id: id.to_string(),
            name,
        })
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending = None;
    }

    /// Send the staged delete, then reload the dashboard.
    pub async fn confirm_delete<A: AdminApi + ?Sized>(&mut self, api: &A) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Err(IntakeError::internal("no delete awaiting confirmation"));
        };

        api.admin_delete(&pending.id).await.inspect_err(|e| {
            tracing::warn!(id = %pending.id, error = %e, "Delete failed");
        })?;
        tracing::info!(id = %pending.id, name = %pending.name, "Restaurant deleted");

        // The delete went through; a failed refresh only leaves local data.
        if let Err(err) = self.load(api).await {
            tracing::warn!(error = %err, "Reload after delete failed");
            self.restaurants.retain(|r| r.id.as_deref() != Some(pending.id.as_str()));
            self.stats = RestaurantStats::from_records(&self.restaurants);
        }
        Ok(())
    }
}
