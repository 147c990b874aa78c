//! Front end of the `bcrev` binary: CLI schema, configuration layering and
//! the pipelines behind each subcommand.

use anyhow::Context;
use bcrev_emit::default_output_dir;
use bcrev_extract::{EmptyBlockPolicy, Layout};

pub mod cli;
pub mod config;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use pipeline::{Settings, Summary};

/// Runs the parsed command line, printing user-facing output to stdout.
pub fn run(cli: Cli) -> anyhow::Result<()> {
	let mut config = Config::load(cli.config.as_deref())?;
	config.strict |= cli.strict;

	match cli.command {
		Command::Generate {
			input,
			output,
			manifest,
			history,
		} => {
			let settings = settings(config, input, output, manifest.path, history)?;
			let summary = pipeline::generate(&settings)?;
			println!(
				"generated {} adapters in {}",
				summary.revisions,
				summary.output_dir.display()
			);
		}
		Command::Regenerate { manifest, output } => {
			let manifest = manifest.path.unwrap_or(config.manifest);
			let output = match output.or(config.output_dir) {
				Some(dir) => dir,
				None => default_output_dir(
					config
						.input_dir
						.as_deref()
						.context("no output directory: pass --output or set output_dir")?,
				)?,
			};
			let summary = pipeline::regenerate(&manifest, &output, &config.emit)
				.with_context(|| format!("failed to regenerate from {}", manifest.display()))?;
			println!(
				"regenerated {} adapters in {}",
				summary.revisions,
				summary.output_dir.display()
			);
		}
		Command::Show { rev, manifest } => {
			print!("{}", pipeline::show(&rev, manifest.as_deref(), config.history.as_deref())?);
		}
		Command::Resolve { release, manifest } => {
			let manifest = manifest.path.unwrap_or(config.manifest);
			println!("{}", pipeline::resolve(&manifest, &release)?);
		}
	}
	Ok(())
}

/// Layers command-line overrides over `config` into generate settings.
pub fn settings(
	config: Config,
	input: Option<std::path::PathBuf>,
	output: Option<std::path::PathBuf>,
	manifest: Option<std::path::PathBuf>,
	history: Option<std::path::PathBuf>,
) -> anyhow::Result<Settings> {
	let input_dir = input
		.or(config.input_dir)
		.context("no input directory: pass one or set input_dir")?;
	let output_dir = match output.or(config.output_dir) {
		Some(dir) => dir,
		None => default_output_dir(&input_dir)?,
	};
	Ok(Settings {
		output_dir,
		manifest: manifest.unwrap_or(config.manifest),
		history: history.or(config.history),
		layout: Layout {
			prefix: config.emit.file_prefix.clone(),
			excluded_suffixes: config.excluded_suffixes,
		},
		policy: if config.strict {
			EmptyBlockPolicy::Deny
		} else {
			EmptyBlockPolicy::Warn
		},
		emit: config.emit,
		input_dir,
	})
}

/// Logs to stderr. `BCREV_LOG` (or `RUST_LOG`) overrides the default filter.
pub fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("BCREV_LOG")
		.or_else(|_| EnvFilter::try_from_default_env())
		.unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("bcrev=debug,info")
			} else {
				EnvFilter::new("info")
			}
		});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
