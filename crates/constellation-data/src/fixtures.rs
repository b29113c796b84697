//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // constellation-data = { path = "../constellation-data", features = ["test-fixtures"] }
//!
//! use constellation_data::fixtures;
//!
//! let records = fixtures::sample_records();
//! ```

use crate::{DataPayload, UnitRecord};

/// Returns the sample payload from the fixtures file.
///
/// Contains 12 users with `gender`, `format` and `platform` attributes,
/// plus one malformed entry that is skipped when converted to records.
pub fn sample_payload() -> DataPayload {
    let json = include_str!("../tests/fixtures/sample_users.json");
    DataPayload::from_json(json).expect("Failed to parse sample_users.json")
}

/// Returns the sample records (malformed entries already dropped).
pub fn sample_records() -> Vec<UnitRecord> {
    sample_payload().records()
}

/// Three records: two sharing `gender = "f"`, one with `gender = "m"`.
pub fn gender_scenario() -> Vec<UnitRecord> {
    vec![
        UnitRecord::new().with("gender", "f"),
        UnitRecord::new().with("gender", "f"),
        UnitRecord::new().with("gender", "m"),
    ]
}
