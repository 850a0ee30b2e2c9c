//! Maps form state onto the create/update request body.
//!
//! No validation happens here; callers validate the form first. No I/O either:
//! the clock is passed in.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::form::RestaurantForm;
use crate::key::generate_restaurant_key;
use crate::record::RestaurantRecord;

/// Request body accepted by the restaurant create endpoint.
///
/// Optional fields left blank in the form are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    pub restaurant_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    /// `street, city, state zip`
    pub address: String,
    pub primary_phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gm_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gm_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doordash_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uber_eats_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grubhub_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub restaurant_key: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Build the create payload from a validated form.
///
/// `now` is read exactly once so `createdAt` and `updatedAt` are identical.
pub fn build_submission_payload<F>(
    form: &RestaurantForm,
    now: F,
    created_by: Option<&str>,
) -> RecordPayload
where
    F: FnOnce() -> DateTime<Utc>,
{
    let timestamp = format_timestamp(now());
    let restaurant_key =
        generate_restaurant_key(&form.restaurant_name, &form.street_address, &form.zipcode);

    let street = form.street_address.trim();
    let city = form.city.trim();
    let state = form.state.trim();
    let zipcode = form.zipcode.trim();

    RecordPayload {
        restaurant_name: form.restaurant_name.trim().to_string(),
        street_address: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zipcode: zipcode.to_string(),
        address: format!("{street}, {city}, {state} {zipcode}"),
        primary_phone: form.primary_phone.trim().to_string(),
        website_url: optional(&form.website_url),
        menu_url: optional(&form.menu_url),
        menu_comments: optional(&form.menu_comments),
        gm_name: optional(&form.gm_name),
        gm_phone: optional(&form.gm_phone),
        secondary_phone: optional(&form.secondary_phone),
        third_phone: optional(&form.third_phone),
        doordash_url: optional(&form.doordash_url),
        uber_eats_url: optional(&form.uber_eats_url),
        grubhub_url: optional(&form.grubhub_url),
        notes: optional(&form.notes),
        restaurant_key,
        created_at: timestamp.clone(),
        updated_at: timestamp,
        created_by: created_by.map(str::to_string),
    }
}

/// Build the update payload for an existing record.
///
/// `restaurantKey`, `createdAt` and `createdBy` carry over from the stored
/// record and only `updatedAt` moves. A record saved without a key gets one
/// derived from the edited form.
pub fn build_update_payload<F>(
    existing: &RestaurantRecord,
    form: &RestaurantForm,
    now: F,
) -> RecordPayload
where
    F: FnOnce() -> DateTime<Utc>,
{
    let updated_at = now();
    let mut payload = build_submission_payload(form, || updated_at, existing.created_by.as_deref());
    if let Some(key) = existing.restaurant_key.as_deref().filter(|k| !k.is_empty()) {
        payload.restaurant_key = key.to_string();
    }
    if let Some(created_at) = existing.created_at.clone() {
        payload.created_at = created_at;
    }
    payload
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
