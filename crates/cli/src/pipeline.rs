//! The generate, regenerate, show and resolve pipelines.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bcrev_emit::{EmitConfig, emit_all};
use bcrev_extract::{EmptyBlockPolicy, Layout, discover, extract};
use bcrev_registry::{Registry, RegistryBuilder, RevisionRecord, manifest};
use bcrev_registry_spec::{HistoryEntry, HistoryStore, RevisionId};

/// Fully resolved inputs of a `generate` run.
#[derive(Debug, Clone)]
pub struct Settings {
	pub input_dir: PathBuf,
	pub output_dir: PathBuf,
	pub manifest: PathBuf,
	pub history: Option<PathBuf>,
	pub layout: Layout,
	pub policy: EmptyBlockPolicy,
	pub emit: EmitConfig,
}

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
	pub revisions: usize,
	pub output_dir: PathBuf,
	pub manifest: Option<PathBuf>,
}

fn load_history(path: Option<&Path>) -> anyhow::Result<HistoryStore> {
	match path {
		Some(path) => {
			let source = std::fs::read_to_string(path)
				.with_context(|| format!("failed to read history {}", path.display()))?;
			HistoryStore::from_toml(&source).with_context(|| format!("invalid history {}", path.display()))
		}
		None => Ok(HistoryStore::builtin()?.clone()),
	}
}

/// Extracts every artifact pair, resolves the registry, emits adapters and
/// writes the manifest. Stops at the first error.
pub fn generate(settings: &Settings) -> anyhow::Result<Summary> {
	let history = load_history(settings.history.as_deref())?;
	let pairs = discover(&settings.input_dir, &settings.layout)
		.with_context(|| format!("failed to scan {}", settings.input_dir.display()))?;
	tracing::info!(dir = %settings.input_dir.display(), artifacts = pairs.len(), "extracting");

	let mut builder = RegistryBuilder::new(&history);
	for pair in &pairs {
		let snapshot = extract(pair, settings.policy)?;
		builder.push(snapshot)?;
	}
	let registry = builder.build()?;

	emit_all(&registry, &settings.emit, &settings.output_dir)?;
	manifest::write(&registry, &settings.manifest)?;
	Ok(Summary {
		revisions: registry.len(),
		output_dir: settings.output_dir.clone(),
		manifest: Some(settings.manifest.clone()),
	})
}

/// Re-emits every adapter recorded in `manifest_path`.
pub fn regenerate(manifest_path: &Path, output_dir: &Path, emit: &EmitConfig) -> anyhow::Result<Summary> {
	let registry = manifest::read(manifest_path)?;
	emit_all(&registry, emit, output_dir)?;
	Ok(Summary {
		revisions: registry.len(),
		output_dir: output_dir.to_path_buf(),
		manifest: None,
	})
}

/// Picks the revision for engine release `label` from the manifest.
pub fn resolve(manifest_path: &Path, label: &str) -> anyhow::Result<RevisionId> {
	let registry = manifest::read(manifest_path)?;
	match registry.for_release(label)? {
		Some(record) => Ok(record.id.clone()),
		None => bail!("no revision found for engine version '{label}'"),
	}
}

/// Summarizes `rev` from a manifest, or from the history when no manifest is given.
pub fn show(rev: &str, manifest_path: Option<&Path>, history: Option<&Path>) -> anyhow::Result<String> {
	let id = RevisionId::parse(rev)?;
	match manifest_path {
		Some(path) => {
			let registry = manifest::read(path)?;
			let Some(record) = registry.get(&id) else {
				bail!("revision '{id}' is not in {}", path.display());
			};
			Ok(describe_record(&registry, record)?)
		}
		None => {
			let history = load_history(history)?;
			let Some(entry) = history.get(&id) else {
				bail!("revision '{id}' is not in the revision history");
			};
			Ok(describe_entry(entry, history.parent(&id))?)
		}
	}
}

fn list(names: impl IntoIterator<Item = impl AsRef<str>>) -> String {
	let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
	if names.is_empty() { "-".to_string() } else { names.join(", ") }
}

fn describe_entry(entry: &HistoryEntry, parent: Option<&RevisionId>) -> Result<String, std::fmt::Error> {
	let release = &entry.release;
	let changes = &entry.delta.changes;
	let mut out = String::new();
	writeln!(out, "revision           {} ({:#x})", entry.id(), entry.id().number())?;
	writeln!(out, "engine             {}{}", release.version, if release.is_dev { " (dev)" } else { "" })?;
	writeln!(out, "compatible         {} ..= {}", release.min_version, release.max_version)?;
	writeln!(out, "date               {}", release.date)?;
	writeln!(out, "parent             {}", parent.map_or("-".to_string(), ToString::to_string))?;
	writeln!(out, "added tokens       {}", list(&changes.added_tokens))?;
	writeln!(out, "removed tokens     {}", list(&changes.removed_tokens))?;
	writeln!(
		out,
		"renamed tokens     {}",
		list(changes.tokens_renamed.iter().map(|r| format!("{} -> {}", r.from, r.to)))
	)?;
	writeln!(out, "added functions    {}", list(&changes.added_functions))?;
	writeln!(out, "removed functions  {}", list(&changes.removed_functions))?;
	writeln!(
		out,
		"arg count changed  {}",
		list(changes.arg_count_changed.iter().flat_map(|c| c.names()))
	)?;
	Ok(out)
}

fn describe_record(registry: &Registry, record: &RevisionRecord) -> Result<String, std::fmt::Error> {
	let entry = HistoryEntry {
		delta: bcrev_registry_spec::RevisionDelta {
			id: record.id.clone(),
			changes: record.changes.clone(),
		},
		release: record.release.clone(),
	};
	let parent = registry.parent(&record.id).map(|p| &p.id);
	let mut out = describe_entry(&entry, parent)?;
	let adapter = record.adapter();
	writeln!(out, "bytecode version   {}", record.format_version)?;
	writeln!(out, "generations        engine {}, variant {}", record.engine_major, record.variant_major)?;
	writeln!(
		out,
		"functions          {} ({} without a known signature)",
		record.functions.len(),
		record.functions.len() - adapter.function_count()
	)?;
	writeln!(
		out,
		"tokens             {} ({} without a canonical counterpart)",
		record.tokens.len(),
		adapter.unmapped_tokens().count()
	)?;
	Ok(out)
}
