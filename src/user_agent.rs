//! Shared User-Agent string for source adapter HTTP clients.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/author-profiler";

/// Default User-Agent for source requests (single shared format; no per-source name in header).
#[must_use]
pub(crate) fn default_source_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("author-profiler/{version} (research-tool; +{PROJECT_UA_URL})")
}
