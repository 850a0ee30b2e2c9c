//! Field format checks.
//!
//! Every check returns a plain `bool`. Optional fields treat the empty string
//! as valid; the zipcode has no such exemption.

use once_cell::sync::Lazy;
use regex_lite::Regex;

// Patterns are compiled once from string literals.
#[allow(clippy::expect_used)]
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\(\d{3}\)\d{3}-\d{4}|\d{3}-\d{3}-\d{4}|\d{3}\.\d{3}\.\d{4}|\d{10})$")
        .expect("valid phone regex")
});

#[allow(clippy::expect_used)]
static ZIPCODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(?:-\d{4})?$").expect("valid zipcode regex"));

#[allow(clippy::expect_used)]
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Accepts `(NNN) NNN-NNNN`, `NNN-NNN-NNNN`, `NNN.NNN.NNNN` or ten bare digits.
///
/// Whitespace anywhere in the value is ignored, so `"(214) 555-0100"` and
/// `" 214-555-0100 "` both pass.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    compact.is_empty() || PHONE_RE.is_match(&compact)
}

/// Absolute URL with a scheme and a non-empty host.
pub fn is_valid_url(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    match url::Url::parse(value) {
        Ok(parsed) => parsed.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// `12345` or `12345-6789`, nothing else.
pub fn is_valid_zipcode(value: &str) -> bool {
    ZIPCODE_RE.is_match(value)
}

/// Loose `local@domain.tld` shape used by the auth forms.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
