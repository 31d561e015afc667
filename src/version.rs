//! Observer API Version
//!
//! The version is defined in Cargo.toml under
//! `package.metadata.observer-registry.api_version` and read at build time.
//! It tracks compatibility of the [`Observer`](crate::Observer) trait and
//! handle semantics, not the crate version.

// Include the build-generated API version constant
include!(concat!(env!("OUT_DIR"), "/version_api.rs"));

/// Current observer API version in YYYYMMDD form
pub fn get_api_version() -> i64 {
    API_VERSION
}

/// Convert a YYYYMMDD version to YYYY-MM-DD
pub fn version_to_date_string(version: i64) -> String {
    let year = version / 10000;
    let month = (version % 10000) / 100;
    let day = version % 100;

    format!("{year:04}-{month:02}-{day:02}")
}

/// Check if a required API version is satisfied by this build
pub fn is_api_compatible(required_version: i64) -> bool {
    get_api_version() >= required_version
}
