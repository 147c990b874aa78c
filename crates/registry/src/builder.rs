//! Joins extracted snapshots with the revision history.

use bcrev_registry_spec::{HistoryStore, RevisionId};
use rustc_hash::FxHashMap as HashMap;

use crate::error::{RegistryError, Result};
use crate::record::{RevisionRecord, Snapshot};
use crate::registry::Registry;

/// Collects snapshots and resolves them against a history in history order.
///
/// Every snapshot needs a history entry and every history entry needs a
/// snapshot; either gap fails the build naming the revision.
pub struct RegistryBuilder<'h> {
	history: &'h HistoryStore,
	snapshots: HashMap<RevisionId, Snapshot>,
}

impl<'h> RegistryBuilder<'h> {
	pub fn new(history: &'h HistoryStore) -> Self {
		Self {
			history,
			snapshots: HashMap::default(),
		}
	}

	/// Returns the number of snapshots pushed so far.
	pub fn len(&self) -> usize {
		self.snapshots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.snapshots.is_empty()
	}

	/// Adds one extracted snapshot.
	pub fn push(&mut self, snapshot: Snapshot) -> Result<()> {
		if !self.history.contains(&snapshot.id) {
			return Err(RegistryError::UnknownRevision(snapshot.id));
		}
		if self.snapshots.contains_key(&snapshot.id) {
			return Err(RegistryError::DuplicateRevision(snapshot.id));
		}
		self.snapshots.insert(snapshot.id.clone(), snapshot);
		Ok(())
	}

	/// Adds multiple snapshots, stopping at the first rejected one.
	pub fn extend<I: IntoIterator<Item = Snapshot>>(&mut self, snapshots: I) -> Result<()> {
		snapshots.into_iter().try_for_each(|snapshot| self.push(snapshot))
	}

	/// Resolves every history entry against its snapshot.
	pub fn build(mut self) -> Result<Registry> {
		let mut records = Vec::with_capacity(self.history.len());
		for entry in self.history.entries() {
			let Some(snapshot) = self.snapshots.remove(entry.id()) else {
				return Err(RegistryError::MissingArtifact(entry.id().clone()));
			};
			records.push(RevisionRecord::resolve(snapshot, entry));
		}
		let registry = Registry::from_records(records)?;
		tracing::debug!(revisions = registry.len(), "registry resolved");
		Ok(registry)
	}
}
