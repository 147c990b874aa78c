use bcrev_registry_spec::{ArgCountChange, Changes, Release, RevisionId, TokenRename};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{builtin_registry, id, record};
use crate::{Registry, RevisionRecord, manifest};

const SINGLE: &str = r#"[
    {
        "bytecode_rev": "514a3fb",
        "bytecode_version": 13,
        "date": "2019-03-19",
        "engine_version": "3.1.1-stable",
        "min_engine_version": "3.1.1-stable",
        "max_engine_version": "3.1.1-stable",
        "engine_ver_major": 3,
        "variant_ver_major": 3,
        "is_dev": false,
        "added_tokens": [],
        "removed_tokens": [],
        "added_functions": [],
        "removed_functions": [],
        "arg_count_changed": [
            "var2bytes",
            [
                "get_inst",
                "instance_from_id"
            ]
        ],
        "tokens_renamed": [
            {
                "SLAVESYNC": "PUPPETSYNC"
            }
        ],
        "func_names": [
            "sin"
        ],
        "tk_names": [
            "TK_EOF",
            "TK_MAX"
        ]
    }
]
"#;

fn single() -> Registry {
	let mut record = record("514a3fb", &["sin"], &["TK_EOF", "TK_MAX"]);
	record.changes.arg_count_changed = vec![
		ArgCountChange::Name("var2bytes".into()),
		ArgCountChange::Pair("get_inst".into(), "instance_from_id".into()),
	];
	record.changes.tokens_renamed = vec![TokenRename::new("SLAVESYNC", "PUPPETSYNC")];
	Registry::from_records([record]).unwrap()
}

#[test]
fn writes_keys_in_manifest_order() {
	let bytes = manifest::to_vec(&single()).unwrap();
	assert_eq!(String::from_utf8(bytes).unwrap(), SINGLE);
}

#[test]
fn reads_what_it_writes() {
	let registry = manifest::from_slice(SINGLE.as_bytes()).unwrap();
	assert_eq!(registry, single());
}

#[test]
fn rename_survives_regardless_of_token_lists() {
	let registry = builtin_registry();
	let reloaded = manifest::from_slice(&manifest::to_vec(&registry).unwrap()).unwrap();
	let record = reloaded.get(&id("d6b31da")).unwrap();
	assert!(record.tokens.is_empty());
	assert_eq!(record.changes.tokens_renamed, vec![TokenRename::new("SLAVESYNC", "PUPPETSYNC")]);
	assert_eq!(reloaded, registry);
}

#[test]
fn file_round_trip_preserves_order_and_lineage() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join(manifest::DEFAULT_MANIFEST);
	let registry = builtin_registry();
	manifest::write(&registry, &path).unwrap();
	let reloaded = manifest::read(&path).unwrap();

	assert_eq!(reloaded.ids().collect::<Vec<_>>(), registry.ids().collect::<Vec<_>>());
	assert_eq!(
		reloaded.parent(&id("514a3fb")).map(|r| r.id.as_str()),
		Some("1a36141")
	);
}

#[test]
fn output_is_deterministic() {
	let registry = builtin_registry();
	assert_eq!(manifest::to_vec(&registry).unwrap(), manifest::to_vec(&registry).unwrap());
}

#[test]
fn missing_file_names_the_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.json");
	let err = manifest::read(&path).unwrap_err();
	assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_manifest_is_an_error() {
	assert!(manifest::from_slice(b"[{\"bytecode_rev\": 5}]").is_err());
}

fn name() -> impl Strategy<Value = String> {
	"[A-Za-z_][A-Za-z0-9_]{0,11}"
}

fn arg_change() -> impl Strategy<Value = ArgCountChange> {
	prop_oneof![
		name().prop_map(ArgCountChange::Name),
		(name(), name()).prop_map(|(a, b)| ArgCountChange::Pair(a, b)),
	]
}

fn changes() -> impl Strategy<Value = Changes> {
	let list = || prop::collection::vec(name(), 0..4);
	(
		list(),
		list(),
		list(),
		list(),
		prop::collection::vec(arg_change(), 0..3),
		prop::collection::vec((name(), name()).prop_map(|(a, b)| TokenRename::new(a, b)), 0..3),
	)
		.prop_map(|(at, rt, af, rf, acc, tr)| Changes {
			added_tokens: at,
			removed_tokens: rt,
			added_functions: af,
			removed_functions: rf,
			arg_count_changed: acc,
			tokens_renamed: tr,
		})
}

fn record_with(number: u32) -> impl Strategy<Value = RevisionRecord> {
	(
		any::<u32>(),
		0u32..5,
		0u32..5,
		(2014i32..2030, 1u32..13, 1u32..29),
		"[0-9]\\.[0-9](\\.[0-9])?-(dev|stable|beta[0-9])",
		any::<bool>(),
		changes(),
		prop::collection::vec(name(), 0..8),
		prop::collection::btree_set(name(), 0..8),
	)
		.prop_map(
			move |(format_version, engine_major, variant_major, (y, m, d), version, is_dev, changes, functions, tokens)| {
				RevisionRecord {
					id: RevisionId::parse(&format!("{number:x}")).unwrap(),
					format_version,
					engine_major,
					variant_major,
					release: Release {
						date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
						min_version: version.clone(),
						max_version: version.clone(),
						version,
						is_dev,
					},
					changes,
					functions,
					tokens: tokens.into_iter().collect(),
				}
			},
		)
}

fn registry() -> impl Strategy<Value = Registry> {
	prop::collection::btree_set(any::<u32>(), 0..4).prop_flat_map(|numbers| {
		numbers
			.into_iter()
			.map(record_with)
			.collect::<Vec<_>>()
			.prop_map(|records| Registry::from_records(records).unwrap())
	})
}

proptest! {
	#[test]
	fn manifest_round_trips(registry in registry()) {
		let bytes = manifest::to_vec(&registry).unwrap();
		prop_assert_eq!(manifest::from_slice(&bytes).unwrap(), registry);
	}
}
