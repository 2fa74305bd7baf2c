//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Build an enriched author profile from DBLP and Semantic Scholar.
///
/// Looks the author up in the local record store first; on a miss, fetches
/// publications and profile metadata, merges them, and stores the result.
/// The record is printed to stdout as JSON.
#[derive(Parser, Debug)]
#[command(name = "author-profiler")]
#[command(author, version, about)]
pub struct Args {
    /// Author name to look up (prompted on stdin when omitted)
    pub name: Option<String>,

    /// Path of the SQLite record store [default: author-profiler.db]
    #[arg(short, long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["author-profiler"]).unwrap();
        assert!(args.name.is_none());
        assert!(args.database.is_none());
        assert!(args.config.is_none());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_positional_name() {
        let args = Args::try_parse_from(["author-profiler", "Jane Doe"]).unwrap();
        assert_eq!(args.name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_cli_database_flag() {
        let args =
            Args::try_parse_from(["author-profiler", "--database", "/tmp/a.db", "X"]).unwrap();
        assert_eq!(args.database, Some(PathBuf::from("/tmp/a.db")));

        let args = Args::try_parse_from(["author-profiler", "-d", "b.db"]).unwrap();
        assert_eq!(args.database, Some(PathBuf::from("b.db")));
    }

    #[test]
    fn test_cli_config_flag() {
        let args = Args::try_parse_from(["author-profiler", "--config", "c.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["author-profiler", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["author-profiler", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        let result = Args::try_parse_from(["author-profiler", "-q", "-v"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["author-profiler", "--help"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let result = Args::try_parse_from(["author-profiler", "--version"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayVersion
        );
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["author-profiler", "--invalid-flag"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::UnknownArgument
        );
    }
}
