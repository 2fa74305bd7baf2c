//! CLI entry point for the author profiler.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use author_profiler::sources::{DblpSource, SemanticScholarSource};
use author_profiler::store::SqliteRecordStore;
use author_profiler::{AuthorPipeline, Database, KeywordExtractor, config, render_author};
use clap::Parser;
use tracing::{debug, info};

mod cli;
mod settings;

use cli::Args;
use settings::RuntimeSettings;

/// Prompt shown when no name is passed on the command line.
const NAME_PROMPT: &str = "Enter the author's name: ";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let file_config = config::load_file_config(args.config.as_deref())?.unwrap_or_default();
    let settings = RuntimeSettings::resolve(&args, file_config);

    init_tracing(settings.log_level);
    debug!(?args, "CLI arguments parsed");

    let name = match args.name.as_deref() {
        Some(name) => name.trim().to_string(),
        None => prompt_for_name()?,
    };
    if name.is_empty() {
        bail!("No author name provided\n  Suggestion: Pass a name, e.g. author-profiler \"Jane Doe\"");
    }

    let db = Database::new_with_options(&settings.database_path, settings.db_options)
        .await
        .with_context(|| {
            format!(
                "Failed to open record store '{}'",
                settings.database_path.display()
            )
        })?;

    let pipeline = build_pipeline(&settings, SqliteRecordStore::new(db.clone()))?;

    info!(author = %name, "Resolving author profile");
    let outcome = pipeline.run(&name).await;
    db.close().await;
    let outcome = outcome?;

    println!("{}", render_author(&outcome.author)?);
    Ok(())
}

fn init_tracing(default_level: &str) {
    // Priority: RUST_LOG env var > quiet flag > verbose flag > config > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn build_pipeline(
    settings: &RuntimeSettings,
    store: SqliteRecordStore,
) -> Result<AuthorPipeline<SqliteRecordStore>> {
    let mut dblp = match &settings.dblp_base_url {
        Some(base_url) => DblpSource::with_base_url(base_url.as_str(), settings.timeouts)?,
        None => DblpSource::new(settings.timeouts)?,
    };
    if let Some(max_hits) = settings.dblp_max_hits {
        dblp = dblp.with_max_hits(max_hits);
    }

    let mut scholar = match &settings.profile_base_url {
        Some(base_url) => {
            SemanticScholarSource::with_base_url(base_url.as_str(), settings.timeouts)?
        }
        None => SemanticScholarSource::new(settings.timeouts)?,
    };
    if let Some(api_key) = &settings.profile_api_key {
        scholar = scholar.with_api_key(api_key.as_str())?;
    }

    Ok(
        AuthorPipeline::new(store, Arc::new(dblp), Arc::new(scholar), KeywordExtractor::new())
            .with_max_keywords(settings.max_keywords),
    )
}

/// Reads one line from stdin after writing the prompt to stderr.
fn prompt_for_name() -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{NAME_PROMPT}")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read author name from stdin")?;
    Ok(line.trim().to_string())
}
