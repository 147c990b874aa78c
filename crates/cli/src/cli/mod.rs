//! CLI schema for the `bcrev` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bcrev")]
#[command(about = "Bytecode revision registry and adapter generator")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Configuration file (defaults to ./bcrev.toml when present)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Debug logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Treat missing or empty token/function blocks as errors
	#[arg(long, global = true)]
	pub strict: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Extract every revision artifact, emit adapters and write the manifest
	Generate {
		/// Directory holding `<prefix>_<rev>.cpp` / `.h` pairs
		input: Option<PathBuf>,
		/// Output directory (defaults to the input directory name plus `2`)
		#[arg(long, short = 'o', value_name = "DIR")]
		output: Option<PathBuf>,
		#[command(flatten)]
		manifest: ManifestArg,
		/// Alternative revision history (TOML) instead of the embedded one
		#[arg(long, value_name = "PATH")]
		history: Option<PathBuf>,
	},
	/// Re-emit every adapter from a manifest without extraction
	Regenerate {
		#[command(flatten)]
		manifest: ManifestArg,
		/// Output directory
		#[arg(long, short = 'o', value_name = "DIR")]
		output: Option<PathBuf>,
	},
	/// Print one revision's resolved summary
	Show {
		/// Revision identifier, e.g. 514a3fb
		rev: String,
		/// Read the record from this manifest instead of the embedded history
		#[arg(long, short = 'm', value_name = "PATH")]
		manifest: Option<PathBuf>,
	},
	/// Name the revision that decodes scripts from an engine release
	Resolve {
		/// Engine version label, e.g. 3.1.2-stable or 3.2-dev
		release: String,
		#[command(flatten)]
		manifest: ManifestArg,
	},
}

/// Manifest location override.
#[derive(clap::Args, Debug, Default)]
pub struct ManifestArg {
	/// Manifest path (defaults to bytecode_versions.json)
	#[arg(long = "manifest", short = 'm', value_name = "PATH")]
	pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests;
