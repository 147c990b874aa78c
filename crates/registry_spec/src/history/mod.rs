//! The revision history store.
//!
//! The history is a versioned constant dataset: an ordered list of
//! [`RevisionDelta`]s (newest first) plus a release table keyed by revision.
//! The builtin copy is embedded from `assets/history.toml` and parsed once per
//! process; [`HistoryStore::from_toml`] loads alternative histories for tests
//! and for out-of-tree revision sets.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::Deserialize;
use thiserror::Error;

use crate::{Release, ReleaseMeta, RevisionDelta, RevisionId};

/// Embedded history asset.
const HISTORY_TOML: &str = include_str!("../../assets/history.toml");

static BUILTIN: OnceLock<HistoryStore> = OnceLock::new();

/// Errors raised while loading a revision history.
#[derive(Debug, Error)]
pub enum HistoryError {
	#[error("failed to parse revision history: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("duplicate revision '{0}' in history")]
	DuplicateRevision(RevisionId),
	#[error("revision '{0}' has no release metadata")]
	MissingRelease(RevisionId),
	#[error("release metadata for '{0}' has no matching revision entry")]
	OrphanRelease(RevisionId),
	#[error("revision '{rev}' lists '{name}' as both added and removed")]
	ConflictingDelta { rev: RevisionId, name: String },
}

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// On-disk shape of the history asset.
#[derive(Debug, Deserialize)]
struct HistoryFile {
	#[serde(default, rename = "revision")]
	revisions: Vec<RevisionDelta>,
	#[serde(default, rename = "release")]
	releases: HashMap<RevisionId, ReleaseMeta>,
}

/// One validated history entry: the delta with its resolved release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	pub delta: RevisionDelta,
	pub release: Release,
}

impl HistoryEntry {
	pub fn id(&self) -> &RevisionId {
		&self.delta.id
	}
}

/// Validated, immutable revision history in declared (newest first) order.
#[derive(Debug, Clone)]
pub struct HistoryStore {
	entries: Vec<HistoryEntry>,
	index: HashMap<RevisionId, usize>,
}

impl HistoryStore {
	/// Returns the history embedded in this crate, parsing it on first use.
	pub fn builtin() -> Result<&'static HistoryStore> {
		if let Some(store) = BUILTIN.get() {
			return Ok(store);
		}
		let store = Self::from_toml(HISTORY_TOML)?;
		Ok(BUILTIN.get_or_init(|| store))
	}

	/// Parses and validates a history document.
	pub fn from_toml(source: &str) -> Result<Self> {
		let file: HistoryFile = toml::from_str(source)?;
		Self::from_parts(file.revisions, file.releases)
	}

	/// Validates deltas against release metadata and resolves derived fields.
	pub fn from_parts(
		deltas: Vec<RevisionDelta>,
		mut releases: HashMap<RevisionId, ReleaseMeta>,
	) -> Result<Self> {
		let mut seen = HashSet::default();
		for delta in &deltas {
			if !seen.insert(&delta.id) {
				return Err(HistoryError::DuplicateRevision(delta.id.clone()));
			}
			if let Some(name) = delta.changes.conflict() {
				return Err(HistoryError::ConflictingDelta {
					rev: delta.id.clone(),
					name: name.to_string(),
				});
			}
			if !releases.contains_key(&delta.id) {
				return Err(HistoryError::MissingRelease(delta.id.clone()));
			}
		}
		if let Some(orphan) = releases.keys().filter(|id| !seen.contains(id)).min() {
			return Err(HistoryError::OrphanRelease(orphan.clone()));
		}

		let mut entries = Vec::with_capacity(deltas.len());
		let mut index = HashMap::default();
		for delta in deltas {
			let Some(meta) = releases.remove(&delta.id) else {
				return Err(HistoryError::MissingRelease(delta.id));
			};
			index.insert(delta.id.clone(), entries.len());
			entries.push(HistoryEntry {
				delta,
				release: meta.into(),
			});
		}
		Ok(Self { entries, index })
	}

	pub fn get(&self, id: &RevisionId) -> Option<&HistoryEntry> {
		self.index.get(id).map(|&i| &self.entries[i])
	}

	pub fn contains(&self, id: &RevisionId) -> bool {
		self.index.contains_key(id)
	}

	/// Position of `id` in declared order.
	pub fn position(&self, id: &RevisionId) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// The revision this one was derived from: the next entry in declared order.
	pub fn parent(&self, id: &RevisionId) -> Option<&RevisionId> {
		let pos = self.position(id)?;
		self.entries.get(pos + 1).map(HistoryEntry::id)
	}

	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	pub fn ids(&self) -> impl Iterator<Item = &RevisionId> {
		self.entries.iter().map(HistoryEntry::id)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
