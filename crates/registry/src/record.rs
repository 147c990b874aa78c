//! Resolved per-revision records.

use bcrev_registry_spec::{Changes, HistoryEntry, Release, RevisionId};

use crate::adapter::Adapter;

/// Facts extracted from one revision's artifact pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	pub id: RevisionId,
	pub format_version: u32,
	/// Revision number as written in the declaration artifact.
	pub declared_number: u32,
	pub engine_major: u32,
	pub variant_major: u32,
	pub functions: Vec<String>,
	pub tokens: Vec<String>,
}

/// One fully resolved revision: extracted facts plus the curated delta and
/// release metadata. Positions in `functions` and `tokens` are load-bearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionRecord {
	pub id: RevisionId,
	pub format_version: u32,
	pub engine_major: u32,
	pub variant_major: u32,
	pub release: Release,
	pub changes: Changes,
	pub functions: Vec<String>,
	pub tokens: Vec<String>,
}

impl RevisionRecord {
	/// Joins an extracted snapshot with its history entry.
	pub fn resolve(snapshot: Snapshot, entry: &HistoryEntry) -> Self {
		if snapshot.declared_number != snapshot.id.number() {
			tracing::warn!(
				rev = %snapshot.id,
				declared = format_args!("{:#x}", snapshot.declared_number),
				"declared revision number disagrees with the artifact name"
			);
		}
		Self {
			id: snapshot.id,
			format_version: snapshot.format_version,
			engine_major: snapshot.engine_major,
			variant_major: snapshot.variant_major,
			release: entry.release.clone(),
			changes: entry.delta.changes.clone(),
			functions: snapshot.functions,
			tokens: snapshot.tokens,
		}
	}

	/// Numeric revision identifier.
	pub fn number(&self) -> u32 {
		self.id.number()
	}

	pub fn is_dev(&self) -> bool {
		self.release.is_dev
	}

	/// Builds the lookup and translation view over this record.
	pub fn adapter(&self) -> Adapter<'_> {
		Adapter::new(self)
	}
}
