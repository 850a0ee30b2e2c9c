//! Restaurant entry form state and its validation.

use serde::{Deserialize, Serialize};

use crate::errors::{FormField, IssueKind, ValidationErrors};
use crate::validators::{is_valid_phone, is_valid_url, is_valid_zipcode};

/// Flat form state as typed by the user. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestaurantForm {
    // Basic info
    pub restaurant_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub primary_phone: String,
    pub website_url: String,
    pub menu_url: String,
    pub menu_comments: String,

    // Management
    pub gm_name: String,
    pub gm_phone: String,
    pub secondary_phone: String,
    pub third_phone: String,

    // Delivery platforms
    pub doordash_url: String,
    pub uber_eats_url: String,
    pub grubhub_url: String,

    pub notes: String,
}

impl RestaurantForm {
    /// Form with the six required fields filled in
    pub fn new(
        restaurant_name: impl Into<String>,
        street_address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
        primary_phone: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            street_address: street_address.into(),
            city: city.into(),
            state: state.into(),
            zipcode: zipcode.into(),
            primary_phone: primary_phone.into(),
            ..Default::default()
        }
    }

    /// Value of a validated field
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::RestaurantName => &self.restaurant_name,
            FormField::StreetAddress => &self.street_address,
            FormField::City => &self.city,
            FormField::State => &self.state,
            FormField::Zipcode => &self.zipcode,
            FormField::PrimaryPhone => &self.primary_phone,
            FormField::WebsiteUrl => &self.website_url,
            FormField::MenuUrl => &self.menu_url,
            FormField::GmPhone => &self.gm_phone,
            FormField::SecondaryPhone => &self.secondary_phone,
            FormField::ThirdPhone => &self.third_phone,
            FormField::DoordashUrl => &self.doordash_url,
            FormField::UberEatsUrl => &self.uber_eats_url,
            FormField::GrubhubUrl => &self.grubhub_url,
        }
    }

    /// Clear every field for the next entry
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check required fields and formats.
    ///
    /// Required fields count as missing when blank after trimming. A missing
    /// zipcode or primary phone is reported once, as missing, not also as
    /// malformed.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in REQUIRED_FIELDS {
            if self.get(field).trim().is_empty() {
                errors.push(field, IssueKind::Missing);
            }
        }

        if !self.zipcode.trim().is_empty() && !is_valid_zipcode(&self.zipcode) {
            errors.push(FormField::Zipcode, IssueKind::InvalidZipcode);
        }

        for field in PHONE_FIELDS {
            let value = self.get(field);
            if !value.trim().is_empty() && !is_valid_phone(value) {
                errors.push(field, IssueKind::InvalidPhone);
            }
        }

        for field in URL_FIELDS {
            let value = self.get(field).trim();
            if !is_valid_url(value) {
                errors.push(field, IssueKind::InvalidUrl);
            }
        }

        errors.into_result()
    }
}

/// Fields that must be non-empty before submission, in display order
pub const REQUIRED_FIELDS: [FormField; 6] = [
    FormField::RestaurantName,
    FormField::StreetAddress,
    FormField::City,
    FormField::State,
    FormField::Zipcode,
    FormField::PrimaryPhone,
];

const PHONE_FIELDS: [FormField; 4] = [
    FormField::PrimaryPhone,
    FormField::GmPhone,
    FormField::SecondaryPhone,
    FormField::ThirdPhone,
];

const URL_FIELDS: [FormField; 5] = [
    FormField::WebsiteUrl,
    FormField::MenuUrl,
    FormField::DoordashUrl,
    FormField::UberEatsUrl,
    FormField::GrubhubUrl,
];
