//! Generation of per-revision adapters.
//!
//! Each resolved [`RevisionRecord`](bcrev_registry::RevisionRecord) becomes a
//! C++ implementation/declaration pair that exposes the revision's function
//! table and local token enumeration through the decoder framework's uniform
//! interface.

use std::path::{Path, PathBuf};

use bcrev_registry::{Registry, RevisionRecord};

mod config;
mod error;
pub mod render;

pub use config::EmitConfig;
pub use error::{EmitError, Result};
pub use render::{Rendered, render};

/// Paths written for one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFiles {
	pub source: PathBuf,
	pub header: PathBuf,
}

/// Sibling output directory for an input directory: its name plus `2`.
///
/// The input is canonicalized first, so `.` and `dir/..` name the directory
/// they point at.
pub fn default_output_dir(input: &Path) -> Result<PathBuf> {
	let output_dir_error = |source| EmitError::OutputDir {
		path: input.to_path_buf(),
		source,
	};
	let input = input.canonicalize().map_err(output_dir_error)?;
	let Some(name) = input.file_name() else {
		return Err(output_dir_error(std::io::Error::new(
			std::io::ErrorKind::InvalidInput,
			"input directory has no name to derive a sibling from",
		)));
	};
	let mut name = name.to_os_string();
	name.push("2");
	Ok(input.with_file_name(name))
}

/// Writes the adapter pair for `record` into `out_dir`.
pub fn emit_record(
	record: &RevisionRecord,
	parent: Option<&RevisionRecord>,
	config: &EmitConfig,
	out_dir: &Path,
) -> Result<EmittedFiles> {
	let adapter = record.adapter();
	let rendered = render(&adapter, parent.map(|p| &p.id), config)?;
	let stem = config.file_stem(record.id.as_str());
	let files = EmittedFiles {
		source: out_dir.join(format!("{stem}.cpp")),
		header: out_dir.join(format!("{stem}.h")),
	};
	for (path, text) in [(&files.source, &rendered.source), (&files.header, &rendered.header)] {
		std::fs::write(path, text).map_err(|source| EmitError::Io {
			rev: record.id.clone(),
			path: path.clone(),
			source,
		})?;
	}
	tracing::debug!(rev = %record.id, functions = adapter.function_count(), "adapter emitted");
	Ok(files)
}

/// Writes adapters for every record of `registry` into `out_dir`, creating it if needed.
pub fn emit_all(registry: &Registry, config: &EmitConfig, out_dir: &Path) -> Result<Vec<EmittedFiles>> {
	std::fs::create_dir_all(out_dir).map_err(|source| EmitError::OutputDir {
		path: out_dir.to_path_buf(),
		source,
	})?;
	let files = registry
		.records()
		.map(|record| emit_record(record, registry.parent(&record.id), config, out_dir))
		.collect::<Result<Vec<_>>>()?;
	tracing::info!(dir = %out_dir.display(), revisions = files.len(), "adapters written");
	Ok(files)
}

#[cfg(test)]
mod tests;
