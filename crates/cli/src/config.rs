//! `bcrev.toml` configuration layered under command-line flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bcrev_emit::EmitConfig;
use bcrev_extract::DEFAULT_EXCLUDED_SUFFIXES;
use bcrev_registry::manifest::DEFAULT_MANIFEST;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "bcrev.toml";

/// File-level settings. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub input_dir: Option<PathBuf>,
	pub output_dir: Option<PathBuf>,
	pub manifest: PathBuf,
	/// Alternative revision history replacing the embedded one.
	pub history: Option<PathBuf>,
	pub excluded_suffixes: Vec<String>,
	pub strict: bool,
	pub emit: EmitConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			input_dir: None,
			output_dir: None,
			manifest: PathBuf::from(DEFAULT_MANIFEST),
			history: None,
			excluded_suffixes: DEFAULT_EXCLUDED_SUFFIXES.map(String::from).to_vec(),
			strict: false,
			emit: EmitConfig::default(),
		}
	}
}

impl Config {
	pub fn from_toml(source: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Loads `path`, or `bcrev.toml` from the working directory when present,
	/// or falls back to defaults.
	pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let path = match path {
			Some(path) => path.to_path_buf(),
			None => {
				let fallback = PathBuf::from(DEFAULT_CONFIG);
				if !fallback.is_file() {
					return Ok(Self::default());
				}
				fallback
			}
		};
		let source = std::fs::read_to_string(&path)
			.with_context(|| format!("failed to read config {}", path.display()))?;
		let config = Self::from_toml(&source)
			.with_context(|| format!("invalid config {}", path.display()))?;
		tracing::debug!(path = %path.display(), "config loaded");
		Ok(config)
	}
}
