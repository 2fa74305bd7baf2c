//! Configuration file loading for CLI defaults.
//!
//! The file is a flat `key = value` subset of TOML: double-quoted strings,
//! non-negative integers and `#` comments. Every key is optional; CLI flags
//! override whatever the file sets.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Application directory name under the config base directory.
const APP_DIR: &str = "author-profiler";

/// File-backed configuration for profiler defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Path of the SQLite record store.
    pub database_path: Option<PathBuf>,
    /// Base URL of the DBLP API (mirrors, testing).
    pub dblp_base_url: Option<String>,
    /// Base URL of the Semantic Scholar API.
    pub profile_base_url: Option<String>,
    /// Semantic Scholar API key, sent as `x-api-key`.
    pub profile_api_key: Option<String>,
    /// DBLP hits requested per query (1..=1000).
    pub dblp_max_hits: Option<u32>,
    /// Keywords extracted per abstract (1..=100).
    pub max_keywords: Option<usize>,
    /// Source client connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Source client read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Database pool max connections (1..=20).
    pub db_max_connections: Option<u32>,
    /// Database busy timeout in milliseconds.
    pub db_busy_timeout_ms: Option<u32>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range key.
    pub fn validate(&self) -> Result<()> {
        validate_range("dblp_max_hits", self.dblp_max_hits.map(u64::from), 1, 1000)?;
        validate_range(
            "max_keywords",
            self.max_keywords
                .map(|v| u64::try_from(v).unwrap_or(u64::MAX)),
            1,
            100,
        )?;
        validate_range("connect_timeout_secs", self.connect_timeout_secs, 1, 3600)?;
        validate_range("read_timeout_secs", self.read_timeout_secs, 1, 3600)?;
        validate_range(
            "db_max_connections",
            self.db_max_connections.map(u64::from),
            1,
            20,
        )?;
        validate_range(
            "db_busy_timeout_ms",
            self.db_busy_timeout_ms.map(u64::from),
            0,
            120_000,
        )?;

        for (field, value) in [
            ("dblp_base_url", &self.dblp_base_url),
            ("profile_base_url", &self.profile_base_url),
        ] {
            if let Some(url) = value
                && !(url.starts_with("http://") || url.starts_with("https://"))
            {
                bail!("Invalid config value for `{field}`: '{url}'. Expected an http(s) URL");
            }
        }

        Ok(())
    }
}

fn validate_range(field: &str, value: Option<u64>, min: u64, max: u64) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(min..=max).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: {min}..={max}");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/author-profiler/config.toml`
/// 2. `$HOME/.config/author-profiler/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_DIR).join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// unknown or absent, `Ok(None)` is returned.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has invalid syntax, uses an
/// unknown key, or holds an out-of-range value.
pub fn load_file_config(explicit_path: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = explicit_path {
        return read_file_config(path).map(Some);
    }

    match resolve_default_config_path() {
        Some(path) if path.exists() => read_file_config(&path).map(Some),
        _ => Ok(None),
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "database_path" => {
                cfg.database_path = Some(PathBuf::from(
                    parse_string_literal(value).with_context(invalid)?,
                ));
            }
            "dblp_base_url" => {
                cfg.dblp_base_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "profile_base_url" => {
                cfg.profile_base_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "profile_api_key" => {
                cfg.profile_api_key = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "dblp_max_hits" => {
                cfg.dblp_max_hits = Some(parse_integer(value).with_context(invalid)?);
            }
            "max_keywords" => {
                cfg.max_keywords = Some(parse_integer(value).with_context(invalid)?);
            }
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer(value).with_context(invalid)?);
            }
            "db_max_connections" => {
                cfg.db_max_connections = Some(parse_integer(value).with_context(invalid)?);
            }
            "db_busy_timeout_ms" => {
                cfg.db_busy_timeout_ms = Some(parse_integer(value).with_context(invalid)?);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer<T: TryFrom<u64>>(raw_value: &str) -> Result<T> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    let value =
        u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range"))?;
    T::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}
