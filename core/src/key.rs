//! Restaurant key derivation.
//!
//! The key is a natural key: two restaurants sharing name, street address and
//! zipcode get the same key, and nothing here tries to detect that.

/// Derive `{name}-{address}-{zipcode}` with name and address reduced to
/// lowercase ASCII letters and digits.
///
/// Never fails. Empty or all-punctuation inputs produce empty segments.
pub fn generate_restaurant_key(name: &str, street_address: &str, zipcode: &str) -> String {
    format!("{}-{}-{}", clean_segment(name), clean_segment(street_address), zipcode)
}

fn clean_segment(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
