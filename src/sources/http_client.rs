//! Shared HTTP client construction policy for source adapters.
//!
//! Centralizes networking defaults so every adapter is consistent on
//! timeouts, user-agent and compression.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::debug;

use crate::user_agent;

use super::SourceError;

/// Default connect timeout for source requests.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default read timeout for source requests.
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Connect/read timeouts applied to every source client.
///
/// No retries are layered on top; a timed-out call surfaces as
/// [`SourceError::Unreachable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

/// Builds a source HTTP client using shared project policy.
///
/// `source_name` is used only for error messages and logging, not in the
/// User-Agent header.
///
/// # Errors
///
/// Returns [`SourceError::ClientInit`] when client construction fails.
pub fn build_source_http_client(
    source_name: &str,
    timeouts: HttpTimeouts,
) -> Result<Client, SourceError> {
    debug!(
        source = source_name,
        connect_timeout_secs = timeouts.connect_timeout_secs,
        read_timeout_secs = timeouts.read_timeout_secs,
        "Building source HTTP client"
    );
    base_builder(timeouts)
        .build()
        .map_err(|error| SourceError::client_init(source_name, &error.to_string()))
}

fn base_builder(timeouts: HttpTimeouts) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_timeout_secs))
        .timeout(Duration::from_secs(timeouts.read_timeout_secs))
        .user_agent(user_agent::default_source_user_agent())
        .gzip(true)
}

/// Maps a transport-level reqwest failure into a [`SourceError`].
pub(crate) fn transport_error(source_name: &str, error: &reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::unreachable(source_name, "request timed out")
    } else if error.is_decode() {
        SourceError::invalid_response(source_name, &error.to_string())
    } else {
        SourceError::unreachable(source_name, &error.to_string())
    }
}
