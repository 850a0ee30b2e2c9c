//! List engine: search filtering, stable sorting, and the list view's
//! fetch state machine.
//!
//! ```text
//! Idle ──(mount | sort change | refresh | post-create)──▶ Loading
//! Loading ──primary ok──────────────────────────────────▶ Loaded
//! Loading ──primary err, fallback ok────────────────────▶ Loaded
//! Loading ──primary err, fallback err───────────────────▶ Failed (empty list)
//! ```
//!
//! A fetch is started with a [`FetchRequest`] and its [`FetchOutcome`] is
//! applied afterwards. Outcomes that arrive after the view was unmounted, or
//! after a newer request was issued, are dropped.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::errors::IntakeError;
use crate::gateway::{RestaurantApi, SortField, SortOrder, SortSpec};
use crate::record::RestaurantRecord;

/// True if the lower-cased `term` occurs in the name, city, state or manager
/// name. An empty term matches everything; absent fields never match.
pub fn matches_search(record: &RestaurantRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    [
        &record.restaurant_name,
        &record.city,
        &record.state,
        &record.gm_name,
    ]
    .into_iter()
    .flatten()
    .any(|value| value.to_lowercase().contains(&needle))
}

/// Records matching `term`, in their original order
pub fn filter_records<'a>(
    records: &'a [RestaurantRecord],
    term: &str,
) -> Vec<&'a RestaurantRecord> {
    records.iter().filter(|r| matches_search(r, term)).collect()
}

/// Stable in-place sort.
///
/// Names compare case-insensitively. Records without a parseable creation
/// time sort before dated ones when ascending, after them when descending.
pub fn sort_records(records: &mut [RestaurantRecord], spec: SortSpec) {
    match (spec.field, spec.order) {
        (SortField::RestaurantName, SortOrder::Asc) => {
            records.sort_by_cached_key(name_key);
        }
        (SortField::RestaurantName, SortOrder::Desc) => {
            records.sort_by_cached_key(|r| Reverse(name_key(r)));
        }
        (SortField::CreatedAt, SortOrder::Asc) => {
            records.sort_by_cached_key(created_key);
        }
        (SortField::CreatedAt, SortOrder::Desc) => {
            records.sort_by_cached_key(|r| Reverse(created_key(r)));
        }
    }
}

fn name_key(record: &RestaurantRecord) -> String {
    record.name().to_lowercase()
}

fn created_key(record: &RestaurantRecord) -> Option<DateTime<Utc>> {
    record.created_at_parsed()
}

/// What caused a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchTrigger {
    Mount,
    SortChanged,
    ManualRefresh,
    PostCreate,
}

/// Which endpoint produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded(FetchSource),
    Failed,
}

/// Ticket for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    generation: u64,
    pub sort: SortSpec,
    pub trigger: FetchTrigger,
}

/// Result of running a [`FetchRequest`] against the gateway
#[derive(Debug)]
pub struct FetchOutcome {
    generation: u64,
    pub result: std::result::Result<(Vec<RestaurantRecord>, FetchSource), IntakeError>,
}

/// Run one fetch: the sorted primary call, then a single parameter-less
/// fallback if it fails.
pub async fn run_fetch<A>(api: &A, request: FetchRequest) -> FetchOutcome
where
    A: RestaurantApi + ?Sized,
{
    let result = match api.list(request.sort).await {
        Ok(records) => {
            tracing::info!(
                count = records.len(),
                sort = %request.sort,
                trigger = ?request.trigger,
                "Loaded restaurants"
            );
            Ok((records, FetchSource::Primary))
        }
        Err(primary) => {
            tracing::warn!(error = %primary, "Restaurant fetch failed, trying fallback");
            match api.list_fallback().await {
                Ok(records) => {
                    tracing::info!(count = records.len(), "Fallback loaded restaurants");
                    Ok((records, FetchSource::Fallback))
                }
                Err(fallback) => {
                    tracing::error!(error = %fallback, "Fallback fetch also failed");
                    Err(fallback)
                }
            }
        }
    };

    FetchOutcome {
        generation: request.generation,
        result,
    }
}

/// State owned by the restaurant list view
#[derive(Debug, Default)]
pub struct ListController {
    records: Vec<RestaurantRecord>,
    sort: SortSpec,
    search: String,
    state: ListState,
    last_error: Option<IntakeError>,
    mounted: bool,
    generation: u64,
}

impl ListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a specific sort instead of newest-first
    pub fn with_sort(sort: SortSpec) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// All fetched records, in server order
    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    pub fn last_error(&self) -> Option<&IntakeError> {
        self.last_error.as_ref()
    }

    /// Records to render: fetched order, filtered by the search term
    pub fn visible(&self) -> Vec<&RestaurantRecord> {
        filter_records(&self.records, &self.search)
    }

    /// Update the search term. Purely local; never fetches.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn mount(&mut self) -> FetchRequest {
        self.mounted = true;
        self.begin(FetchTrigger::Mount)
    }

    /// Leave the view. Fetched data is discarded and late results ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.records.clear();
        self.state = ListState::Idle;
        self.last_error = None;
    }

    /// Pick a sort column (toggle semantics) and refetch with it
    pub fn select_sort(&mut self, field: SortField) -> FetchRequest {
        self.sort = self.sort.toggled(field);
        self.begin(FetchTrigger::SortChanged)
    }

    pub fn refresh(&mut self) -> FetchRequest {
        self.begin(FetchTrigger::ManualRefresh)
    }

    /// Refetch after a restaurant was created elsewhere
    pub fn after_create(&mut self) -> FetchRequest {
        self.begin(FetchTrigger::PostCreate)
    }

    fn begin(&mut self, trigger: FetchTrigger) -> FetchRequest {
        self.generation += 1;
        self.state = ListState::Loading;
        FetchRequest {
            generation: self.generation,
            sort: self.sort,
            trigger,
        }
    }

    /// Apply a finished fetch. Returns `false` when the outcome was stale or
    /// the view is gone.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if !self.mounted {
            tracing::debug!("Dropping fetch result for unmounted list view");
            return false;
        }
        if outcome.generation != self.generation {
            tracing::debug!(
                stale = outcome.generation,
                current = self.generation,
                "Dropping superseded fetch result"
            );
            return false;
        }

        match outcome.result {
            Ok((records, source)) => {
                self.records = records;
                self.state = ListState::Loaded(source);
                self.last_error = None;
            }
            Err(err) => {
                self.records.clear();
                self.state = ListState::Failed;
                self.last_error = Some(err);
            }
        }
        true
    }

    /// Issue, run and apply a fetch in one step
    pub async fn load<A>(&mut self, api: &A, trigger: FetchTrigger) -> ListState
    where
        A: RestaurantApi + ?Sized,
    {
        let request = match trigger {
            FetchTrigger::Mount => self.mount(),
            other => self.begin(other),
        };
        let outcome = run_fetch(api, request).await;
        self.apply(outcome);
        self.state
    }
}
