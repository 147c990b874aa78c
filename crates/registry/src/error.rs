use std::path::PathBuf;

use bcrev_registry_spec::RevisionId;

/// Failures while assembling, loading or persisting a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	/// An artifact was extracted for a revision the history does not track.
	#[error("revision '{0}' was extracted but has no history entry or release metadata")]
	UnknownRevision(RevisionId),
	/// The history tracks a revision no artifact was extracted for.
	#[error("revision '{0}' has a history entry but no extracted artifact")]
	MissingArtifact(RevisionId),
	#[error("revision '{0}' was registered twice")]
	DuplicateRevision(RevisionId),
	/// Two local tokens share a name, which breaks local/canonical round-trips.
	#[error("revision '{rev}' declares local token '{name}' more than once")]
	DuplicateToken { rev: RevisionId, name: String },
	#[error("failed to access manifest {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("malformed manifest: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;
