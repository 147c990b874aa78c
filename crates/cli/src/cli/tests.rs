use clap::{CommandFactory, Parser};

use super::*;

#[test]
fn schema_is_consistent() {
	Cli::command().debug_assert();
}

#[test]
fn parse_generate_with_overrides() {
	let cli = Cli::parse_from([
		"bcrev", "--strict", "generate", "bytecode", "-o", "out", "--manifest", "m.json",
	]);
	assert!(cli.strict);
	let Command::Generate {
		input,
		output,
		manifest,
		history,
	} = cli.command
	else {
		panic!("expected generate");
	};
	assert_eq!(input, Some(PathBuf::from("bytecode")));
	assert_eq!(output, Some(PathBuf::from("out")));
	assert_eq!(manifest.path, Some(PathBuf::from("m.json")));
	assert_eq!(history, None);
}

#[test]
fn global_flags_follow_the_subcommand() {
	let cli = Cli::parse_from(["bcrev", "show", "514a3fb", "-v", "--config", "x.toml"]);
	assert!(cli.verbose);
	assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
	assert!(matches!(cli.command, Command::Show { ref rev, manifest: None } if rev == "514a3fb"));
}

#[test]
fn resolve_requires_a_label() {
	assert!(Cli::try_parse_from(["bcrev", "resolve"]).is_err());
}
