use std::path::PathBuf;

use bcrev_registry_spec::RevisionId;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
	#[error("failed to write adapter for revision '{rev}' to {path}: {source}")]
	Io {
		rev: RevisionId,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to create output directory {path}: {source}")]
	OutputDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to render adapter text")]
	Format(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, EmitError>;
