//! Shared User-Agent string for catalog HTTP traffic.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/flibusta-search";

/// Default User-Agent for catalog requests (identifies the tool).
#[must_use]
pub(crate) fn default_catalog_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("flibusta-search/{version} (opds-client; +{PROJECT_UA_URL})")
}
