//! The resolved revision registry and its queries.

use bcrev_registry_spec::{InvalidLabel, ReleaseLabel, RevisionId};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet as HashSet};

use crate::error::{RegistryError, Result};
use crate::record::RevisionRecord;

/// Resolved records keyed by revision, in history order (newest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
	records: IndexMap<RevisionId, RevisionRecord, FxBuildHasher>,
}

impl Registry {
	/// Builds a registry from records already in history order.
	///
	/// Rejects repeated revisions and records whose local token list repeats
	/// a name.
	pub fn from_records(records: impl IntoIterator<Item = RevisionRecord>) -> Result<Self> {
		let mut map = IndexMap::with_hasher(FxBuildHasher);
		for record in records {
			check_local_tokens(&record)?;
			if map.contains_key(&record.id) {
				return Err(RegistryError::DuplicateRevision(record.id));
			}
			map.insert(record.id.clone(), record);
		}
		Ok(Self { records: map })
	}

	pub fn get(&self, id: &RevisionId) -> Option<&RevisionRecord> {
		self.records.get(id)
	}

	pub fn contains(&self, id: &RevisionId) -> bool {
		self.records.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Records in history order.
	pub fn records(&self) -> impl DoubleEndedIterator<Item = &RevisionRecord> {
		self.records.values()
	}

	pub fn ids(&self) -> impl Iterator<Item = &RevisionId> {
		self.records.keys()
	}

	/// The next older record, which `id` was derived from.
	pub fn parent(&self, id: &RevisionId) -> Option<&RevisionRecord> {
		let pos = self.records.get_index_of(id)?;
		self.records.get_index(pos + 1).map(|(_, record)| record)
	}

	/// Looks a record up by its numeric revision identifier.
	pub fn by_number(&self, number: u32) -> Option<&RevisionRecord> {
		self.records().find(|record| record.number() == number)
	}

	/// Records sharing a bytecode format version, in history order.
	pub fn for_format_version(
		&self,
		format_version: u32,
		include_dev: bool,
	) -> impl Iterator<Item = &RevisionRecord> {
		self.records().filter(move |record| {
			record.format_version == format_version && (include_dev || !record.is_dev())
		})
	}

	/// Picks the record that decodes scripts produced by engine release `label`.
	///
	/// Development labels must match a record's min or max version exactly.
	/// Other labels are matched against the compatible range of non-dev
	/// records of the same major version; a label newer than every range
	/// falls back to the newest record whose minimum it reaches.
	pub fn for_release(&self, label: &str) -> std::result::Result<Option<&RevisionRecord>, InvalidLabel> {
		let wanted = ReleaseLabel::parse(label)?;
		let bounds = |record: &RevisionRecord| {
			let min = ReleaseLabel::parse(&record.release.min_version).ok()?;
			let max = ReleaseLabel::parse(&record.release.max_version).ok()?;
			Some((min, max))
		};
		let mut same_major = self
			.records()
			.rev()
			.filter_map(|record| bounds(record).map(|b| (record, b)))
			.filter(|(_, (min, _))| min.major == wanted.major);

		if wanted.is_dev() {
			return Ok(same_major
				.find(|(_, (min, max))| *min == wanted || *max == wanted)
				.map(|(record, _)| record));
		}

		let mut prev: Option<(ReleaseLabel, &RevisionRecord)> = None;
		for (record, (min, max)) in same_major.filter(|(record, _)| !record.is_dev()) {
			if wanted == min || (wanted > min && wanted <= max) {
				return Ok(Some(record));
			}
			if let Some((prev_min, prev_record)) = prev
				&& wanted < min
				&& wanted >= prev_min
			{
				return Ok(Some(prev_record));
			}
			prev = Some((min, record));
		}
		Ok(prev
			.filter(|(prev_min, _)| wanted >= *prev_min)
			.map(|(_, record)| record))
	}
}

impl<'a> IntoIterator for &'a Registry {
	type Item = &'a RevisionRecord;
	type IntoIter = indexmap::map::Values<'a, RevisionId, RevisionRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.values()
	}
}

fn check_local_tokens(record: &RevisionRecord) -> Result<()> {
	let mut seen = HashSet::default();
	for name in &record.tokens {
		if !seen.insert(name.as_str()) {
			return Err(RegistryError::DuplicateToken {
				rev: record.id.clone(),
				name: name.clone(),
			});
		}
	}
	Ok(())
}
