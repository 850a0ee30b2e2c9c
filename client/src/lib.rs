//! HTTP client for the restaurant functions API.
//!
//! The client is built from an [`intake_core::ApiConfig`]; there is no
//! process-wide base URL.

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod http;

pub use http::HttpRestaurantClient;
