//! Merges CLI flags over file configuration into runtime settings.

use std::path::PathBuf;

use author_profiler::config::{FileConfig, VerbositySetting};
use author_profiler::db::DatabaseOptions;
use author_profiler::keywords::DEFAULT_MAX_KEYWORDS;
use author_profiler::sources::HttpTimeouts;

use crate::cli::Args;

/// Record store path used when neither flag nor config names one.
const DEFAULT_DATABASE_PATH: &str = "author-profiler.db";

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuntimeSettings {
    pub(crate) database_path: PathBuf,
    pub(crate) log_level: &'static str,
    pub(crate) timeouts: HttpTimeouts,
    pub(crate) db_options: DatabaseOptions,
    pub(crate) dblp_base_url: Option<String>,
    pub(crate) dblp_max_hits: Option<u32>,
    pub(crate) profile_base_url: Option<String>,
    pub(crate) profile_api_key: Option<String>,
    pub(crate) max_keywords: usize,
}

impl RuntimeSettings {
    /// CLI flags win over the file; the file wins over built-in defaults.
    pub(crate) fn resolve(args: &Args, config: FileConfig) -> Self {
        let defaults = HttpTimeouts::default();
        let db_defaults = DatabaseOptions::default();

        Self {
            database_path: args
                .database
                .clone()
                .or(config.database_path)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            log_level: log_level(args, config.verbosity),
            timeouts: HttpTimeouts {
                connect_timeout_secs: config
                    .connect_timeout_secs
                    .unwrap_or(defaults.connect_timeout_secs),
                read_timeout_secs: config
                    .read_timeout_secs
                    .unwrap_or(defaults.read_timeout_secs),
            },
            db_options: DatabaseOptions {
                max_connections: config
                    .db_max_connections
                    .unwrap_or(db_defaults.max_connections),
                busy_timeout_ms: config
                    .db_busy_timeout_ms
                    .unwrap_or(db_defaults.busy_timeout_ms),
            },
            dblp_base_url: config.dblp_base_url,
            dblp_max_hits: config.dblp_max_hits,
            profile_base_url: config.profile_base_url,
            profile_api_key: config.profile_api_key,
            max_keywords: config.max_keywords.unwrap_or(DEFAULT_MAX_KEYWORDS),
        }
    }
}

/// Default tracing level. `RUST_LOG` still takes priority at subscriber setup.
fn log_level(args: &Args, configured: Option<VerbositySetting>) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => {}
        1 => return "debug",
        _ => return "trace",
    }
    match configured {
        Some(VerbositySetting::Quiet) => "error",
        Some(VerbositySetting::Verbose) => "debug",
        Some(VerbositySetting::Debug) => "trace",
        Some(VerbositySetting::Default) | None => "info",
    }
}
