//! Artifact pair discovery.

use std::path::{Path, PathBuf};

use bcrev_registry_spec::RevisionId;
use walkdir::WalkDir;

use crate::error::{ExtractError, Result};

pub const SOURCE_EXT: &str = "cpp";
pub const DECLARATION_EXT: &str = "h";

/// Stem suffixes of shared infrastructure files that are not revisions.
pub const DEFAULT_EXCLUDED_SUFFIXES: [&str; 3] = ["_base", "_tester", "_versions"];

/// The primary and declaration artifacts of one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPair {
	pub id: RevisionId,
	pub source: PathBuf,
	pub declaration: PathBuf,
}

/// Naming rules for artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
	/// Stem prefix, joined to the revision by `_`.
	pub prefix: String,
	pub excluded_suffixes: Vec<String>,
}

impl Default for Layout {
	fn default() -> Self {
		Self {
			prefix: "bytecode".to_string(),
			excluded_suffixes: DEFAULT_EXCLUDED_SUFFIXES.map(String::from).to_vec(),
		}
	}
}

impl Layout {
	/// Revision named by a source stem, or `None` when the stem is not a revision artifact.
	pub fn revision_of(&self, stem: &str) -> Option<RevisionId> {
		if self.excluded_suffixes.iter().any(|suffix| stem.ends_with(suffix.as_str())) {
			return None;
		}
		let rest = stem.strip_prefix(self.prefix.as_str())?.strip_prefix('_')?;
		match RevisionId::parse(rest) {
			Ok(id) => Some(id),
			Err(err) => {
				tracing::warn!(stem, %err, "skipping artifact with a non-revision name");
				None
			}
		}
	}
}

/// Finds every revision artifact pair directly inside `dir`, sorted by path.
pub fn discover(dir: &Path, layout: &Layout) -> Result<Vec<ArtifactPair>> {
	let mut sources = Vec::new();
	for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
		let entry = entry?;
		let path = entry.path();
		if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXT) {
			sources.push(entry.into_path());
		}
	}
	sources.sort();

	let mut pairs = Vec::with_capacity(sources.len());
	for source in sources {
		let Some(stem) = source.file_stem().and_then(|s| s.to_str()) else {
			continue;
		};
		let Some(id) = layout.revision_of(stem) else {
			tracing::debug!(path = %source.display(), "not a revision artifact");
			continue;
		};
		let declaration = source.with_extension(DECLARATION_EXT);
		if !declaration.is_file() {
			return Err(ExtractError::MissingDeclaration {
				rev: id,
				path: declaration,
			});
		}
		pairs.push(ArtifactPair {
			id,
			source,
			declaration,
		});
	}
	tracing::debug!(dir = %dir.display(), revisions = pairs.len(), "artifacts discovered");
	Ok(pairs)
}
