//! Runtime settings: an optional TOML file layered under `CASEBOOK_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "casebook.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
  /// SQLite database file. A leading `~/` is expanded.
  #[serde(default = "default_database")]
  pub database:  PathBuf,
  /// Default tracing filter; `RUST_LOG` takes precedence.
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

fn default_database() -> PathBuf { PathBuf::from("crime.db") }

fn default_log_level() -> String { "warn".to_owned() }

impl Settings {
  /// Load settings. An explicitly named file must exist; the default file is
  /// optional.
  pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
    let (path, required) = match file {
      Some(p) => (p.to_path_buf(), true),
      None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let raw = config::Config::builder()
      .add_source(config::File::from(path.clone()).required(required))
      .add_source(config::Environment::with_prefix("CASEBOOK"))
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut settings: Settings =
      raw.try_deserialize().context("failed to deserialise settings")?;
    settings.database = expand_tilde(&settings.database);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
