//! Crate-level tests over records built from small fixtures and the builtin
//! history.

mod manifest;

use bcrev_registry_spec::{Changes, HistoryStore, Release, RevisionId};
use chrono::NaiveDate;

use crate::{Registry, RegistryBuilder, RevisionRecord, Snapshot};

pub(crate) fn id(s: &str) -> RevisionId {
	RevisionId::parse(s).unwrap()
}

pub(crate) fn snapshot(rev: &str, functions: &[&str], tokens: &[&str]) -> Snapshot {
	let id = id(rev);
	Snapshot {
		declared_number: id.number(),
		id,
		format_version: 13,
		engine_major: 3,
		variant_major: 3,
		functions: functions.iter().map(|s| s.to_string()).collect(),
		tokens: tokens.iter().map(|s| s.to_string()).collect(),
	}
}

pub(crate) fn record(rev: &str, functions: &[&str], tokens: &[&str]) -> RevisionRecord {
	let snapshot = snapshot(rev, functions, tokens);
	RevisionRecord {
		id: snapshot.id,
		format_version: snapshot.format_version,
		engine_major: snapshot.engine_major,
		variant_major: snapshot.variant_major,
		release: Release {
			date: NaiveDate::from_ymd_opt(2019, 3, 19).unwrap(),
			version: "3.1.1-stable".into(),
			min_version: "3.1.1-stable".into(),
			max_version: "3.1.1-stable".into(),
			is_dev: false,
		},
		changes: Changes::default(),
		functions: snapshot.functions,
		tokens: snapshot.tokens,
	}
}

/// The builtin history resolved against empty snapshots.
pub(crate) fn builtin_registry() -> Registry {
	let history = HistoryStore::builtin().unwrap();
	let mut builder = RegistryBuilder::new(history);
	for rev in history.ids() {
		builder.push(snapshot(rev.as_str(), &[], &[])).unwrap();
	}
	builder.build().unwrap()
}
