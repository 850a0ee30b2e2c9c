//! Plain-text rendering for restaurant records and admin stats.

use intake_core::{DatabaseStats, RestaurantRecord, RestaurantStats};

/// One line per restaurant: name, location, key, created date
pub(crate) fn record_line(record: &RestaurantRecord) -> String {
    let location = match (record.city.as_deref(), record.state.as_deref()) {
        (Some(city), Some(state)) => format!("{city}, {state}"),
        (Some(city), None) => city.to_string(),
        (None, Some(state)) => state.to_string(),
        (None, None) => "-".to_string(),
    };
    let created = record
        .created_at_parsed()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<32} {:<24} {:<40} {created}",
        record.name(),
        location,
        record.restaurant_key.as_deref().unwrap_or("-"),
    )
}

/// Labelled detail view; absent fields are skipped
pub(crate) fn record_details(record: &RestaurantRecord) -> Vec<String> {
    let mut lines = vec![record.name().to_string()];
    let mut push = |label: &str, value: Option<&str>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            lines.push(format!("  {label:<16} {value}"));
        }
    };

    let address = record.display_address();
    push("id", record.id.as_deref());
    push("key", record.restaurant_key.as_deref());
    push("address", Some(address.as_str()));
    push("phone", record.primary_phone.as_deref());
    push("website", record.website_url.as_deref());
    push("menu", record.menu_url.as_deref());
    push("menu comments", record.menu_comments.as_deref());
    push("manager", record.gm_name.as_deref());
    push("manager phone", record.gm_phone.as_deref());
    push("secondary phone", record.secondary_phone.as_deref());
    push("third phone", record.third_phone.as_deref());
    push("doordash", record.doordash_url.as_deref());
    push("uber eats", record.uber_eats_url.as_deref());
    push("grubhub", record.grubhub_url.as_deref());
    push("notes", record.notes.as_deref());
    push("created", record.created_at.as_deref());
    if record.was_updated() {
        push("updated", record.updated_at.as_deref());
    }
    lines
}

pub(crate) fn stats_lines(stats: &RestaurantStats) -> Vec<String> {
    vec![
        format!("Restaurants:     {}", stats.total_count),
        format!("Cities covered:  {}", stats.cities_covered),
        format!("States covered:  {}", stats.states_covered),
        format!("Cities:          {}", stats.cities.join(", ")),
        format!("States:          {}", stats.states.join(", ")),
    ]
}

pub(crate) fn db_stats_lines(stats: &DatabaseStats) -> Vec<String> {
    let mut lines = vec![format!("Collections: {}", stats.total_collections)];
    for name in &stats.collections {
        let count = stats.collection_stats.get(name).copied().unwrap_or_default();
        lines.push(format!("  {name:<24} {count}"));
    }
    lines
}
