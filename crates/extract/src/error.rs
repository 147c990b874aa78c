use std::path::PathBuf;

use bcrev_registry_spec::RevisionId;

use crate::primary::BlockKind;

/// Failures while discovering or reading revision artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to scan artifact directory: {0}")]
	Walk(#[from] walkdir::Error),
	#[error("revision '{rev}' has no declaration companion at {path}")]
	MissingDeclaration { rev: RevisionId, path: PathBuf },
	#[error("revision '{rev}' declaration is missing `{name}`")]
	MissingScalar { rev: RevisionId, name: &'static str },
	#[error("revision '{rev}' declares `{name}` with unparsable value '{value}'")]
	InvalidScalar {
		rev: RevisionId,
		name: &'static str,
		value: String,
	},
	#[error("revision '{rev}' lists {block} entry '{name}' more than once")]
	DuplicateName {
		rev: RevisionId,
		block: BlockKind,
		name: String,
	},
	/// Raised instead of a warning when extraction runs in strict mode.
	#[error("revision '{rev}' has no {block} entries")]
	EmptyBlock { rev: RevisionId, block: BlockKind },
}

pub type Result<T> = std::result::Result<T, ExtractError>;
