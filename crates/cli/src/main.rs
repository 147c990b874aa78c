//! `bcrev` binary.

use bcrev_emit as _;
use bcrev_extract as _;
use bcrev_registry as _;
use bcrev_registry_spec as _;
use clap::Parser;
#[cfg(test)]
use pretty_assertions as _;
use serde as _;
#[cfg(test)]
use tempfile as _;
use toml as _;
use tracing as _;
use tracing_subscriber as _;

use bcrev_cli::Cli;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	bcrev_cli::setup_tracing(cli.verbose);
	bcrev_cli::run(cli)
}
