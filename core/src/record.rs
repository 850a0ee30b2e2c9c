//! Restaurant records as returned by the persistence API.
//!
//! The client never holds an authoritative copy; these are read-only
//! projections of whatever the server stored. The stored documents use
//! snake_case keys, but older entries were written with the form's camelCase
//! keys, so both spellings are accepted.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::form::RestaurantForm;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantRecord {
    #[serde(alias = "_id", deserialize_with = "lenient_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(alias = "restaurantName")]
    pub restaurant_name: Option<String>,
    #[serde(alias = "streetAddress")]
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "primaryPhone")]
    pub primary_phone: Option<String>,
    #[serde(alias = "websiteUrl")]
    pub website_url: Option<String>,
    #[serde(alias = "menuUrl")]
    pub menu_url: Option<String>,
    #[serde(alias = "menuComments")]
    pub menu_comments: Option<String>,

    #[serde(alias = "gmName")]
    pub gm_name: Option<String>,
    #[serde(alias = "gmPhone")]
    pub gm_phone: Option<String>,
    #[serde(alias = "secondaryPhone")]
    pub secondary_phone: Option<String>,
    #[serde(alias = "thirdPhone")]
    pub third_phone: Option<String>,

    #[serde(alias = "doordashUrl")]
    pub doordash_url: Option<String>,
    #[serde(alias = "uberEatsUrl")]
    pub uber_eats_url: Option<String>,
    #[serde(alias = "grubhubUrl")]
    pub grubhub_url: Option<String>,

    pub notes: Option<String>,

    #[serde(alias = "restaurantKey")]
    pub restaurant_key: Option<String>,
    #[serde(alias = "createdAt", deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(alias = "updatedAt", deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<String>,
    #[serde(alias = "createdBy")]
    pub created_by: Option<String>,
}

impl RestaurantRecord {
    pub fn name(&self) -> &str {
        self.restaurant_name.as_deref().unwrap_or_default()
    }

    /// Creation time, when the stored value is RFC 3339
    pub fn created_at_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.created_at.as_deref()?)
    }

    pub fn updated_at_parsed(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.updated_at.as_deref()?)
    }

    /// True once the record was edited after creation
    pub fn was_updated(&self) -> bool {
        match (&self.created_at, &self.updated_at) {
            (Some(created), Some(updated)) => created != updated,
            _ => false,
        }
    }

    /// `street, city, state zip`, falling back to the stored combined address
    pub fn display_address(&self) -> String {
        if let Some(street) = self.street_address.as_deref() {
            format!(
                "{street}, {}, {} {}",
                self.city.as_deref().unwrap_or_default(),
                self.state.as_deref().unwrap_or_default(),
                self.zipcode.as_deref().unwrap_or_default(),
            )
        } else {
            self.address.clone().unwrap_or_default()
        }
    }

    /// Editable form state seeded from this record
    pub fn to_form(&self) -> RestaurantForm {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        RestaurantForm {
            restaurant_name: text(&self.restaurant_name),
            street_address: text(&self.street_address),
            city: text(&self.city),
            state: text(&self.state),
            zipcode: text(&self.zipcode),
            primary_phone: text(&self.primary_phone),
            website_url: text(&self.website_url),
            menu_url: text(&self.menu_url),
            menu_comments: text(&self.menu_comments),
            gm_name: text(&self.gm_name),
            gm_phone: text(&self.gm_phone),
            secondary_phone: text(&self.secondary_phone),
            third_phone: text(&self.third_phone),
            doordash_url: text(&self.doordash_url),
            uber_eats_url: text(&self.uber_eats_url),
            grubhub_url: text(&self.grubhub_url),
            notes: text(&self.notes),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Identifiers arrive as strings, numbers, or `{"$oid": "..."}`.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Object(map)) => map
            .get("$oid")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

/// Timestamps arrive as RFC 3339 strings or as `{"seconds", "nanoseconds"}`
/// objects; the latter are normalised to RFC 3339.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Object(map)) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64);
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            seconds
                .and_then(|s| Utc.timestamp_opt(s, nanos).single())
                .map(|dt| dt.to_rfc3339())
        }
        _ => None,
    })
}
