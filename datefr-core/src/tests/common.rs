use crate::Config;
use chrono::{DateTime, Utc};

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(reference: Option<DateTime<Utc>>) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        reference,
        ..Config::default()
    }
}
