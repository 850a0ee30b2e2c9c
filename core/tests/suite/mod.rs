// Aggregates all former standalone integration tests as modules.
mod admin_dashboard;
mod entry_flow;
mod fake_api;
mod list_fetch;
