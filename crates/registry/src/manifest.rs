//! The JSON manifest: every resolved record, reloadable without extraction.
//!
//! Records are written in history order with a four-space indent and a
//! trailing newline. Lineage is not stored; it follows from record order.

use std::path::Path;

use bcrev_registry_spec::{Changes, Release, RevisionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{RegistryError, Result};
use crate::record::RevisionRecord;
use crate::registry::Registry;

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "bytecode_versions.json";

/// On-disk shape of one record; field order is the manifest key order.
#[derive(Debug, Serialize, Deserialize)]
struct ManifestEntry {
	bytecode_rev: RevisionId,
	bytecode_version: u32,
	date: NaiveDate,
	engine_version: String,
	min_engine_version: String,
	max_engine_version: String,
	engine_ver_major: u32,
	variant_ver_major: u32,
	is_dev: bool,
	#[serde(flatten)]
	changes: Changes,
	func_names: Vec<String>,
	tk_names: Vec<String>,
}

impl From<&RevisionRecord> for ManifestEntry {
	fn from(record: &RevisionRecord) -> Self {
		Self {
			bytecode_rev: record.id.clone(),
			bytecode_version: record.format_version,
			date: record.release.date,
			engine_version: record.release.version.clone(),
			min_engine_version: record.release.min_version.clone(),
			max_engine_version: record.release.max_version.clone(),
			engine_ver_major: record.engine_major,
			variant_ver_major: record.variant_major,
			is_dev: record.release.is_dev,
			changes: record.changes.clone(),
			func_names: record.functions.clone(),
			tk_names: record.tokens.clone(),
		}
	}
}

impl From<ManifestEntry> for RevisionRecord {
	fn from(entry: ManifestEntry) -> Self {
		Self {
			id: entry.bytecode_rev,
			format_version: entry.bytecode_version,
			engine_major: entry.engine_ver_major,
			variant_major: entry.variant_ver_major,
			release: Release {
				date: entry.date,
				version: entry.engine_version,
				min_version: entry.min_engine_version,
				max_version: entry.max_engine_version,
				is_dev: entry.is_dev,
			},
			changes: entry.changes,
			functions: entry.func_names,
			tokens: entry.tk_names,
		}
	}
}

/// Serializes `registry` to manifest bytes.
pub fn to_vec(registry: &Registry) -> Result<Vec<u8>> {
	let entries: Vec<ManifestEntry> = registry.records().map(ManifestEntry::from).collect();
	let mut buf = Vec::new();
	let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
	entries.serialize(&mut ser)?;
	buf.push(b'\n');
	Ok(buf)
}

/// Reconstructs a registry from manifest bytes.
pub fn from_slice(bytes: &[u8]) -> Result<Registry> {
	let entries: Vec<ManifestEntry> = serde_json::from_slice(bytes)?;
	Registry::from_records(entries.into_iter().map(RevisionRecord::from))
}

/// Writes the manifest for `registry` to `path`.
pub fn write(registry: &Registry, path: &Path) -> Result<()> {
	let bytes = to_vec(registry)?;
	std::fs::write(path, bytes).map_err(|source| RegistryError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	tracing::info!(path = %path.display(), revisions = registry.len(), "manifest written");
	Ok(())
}

/// Loads a registry from the manifest at `path`.
pub fn read(path: &Path) -> Result<Registry> {
	let bytes = std::fs::read(path).map_err(|source| RegistryError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	from_slice(&bytes)
}
