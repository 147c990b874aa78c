use bcrev_registry::signatures;
use bcrev_registry::{Registry, RevisionRecord};
use bcrev_registry_spec::{ArgCountChange, Changes, Release, RevisionId};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn record(rev: &str, functions: &[&str], tokens: &[&str]) -> RevisionRecord {
	RevisionRecord {
		id: RevisionId::parse(rev).unwrap(),
		format_version: 13,
		engine_major: 3,
		variant_major: 3,
		release: Release {
			date: "2019-03-19".parse().unwrap(),
			version: "3.1.1-stable".into(),
			min_version: "3.1.1-stable".into(),
			max_version: "3.1.2-stable".into(),
			is_dev: false,
		},
		changes: Changes::default(),
		functions: functions.iter().map(|s| s.to_string()).collect(),
		tokens: tokens.iter().map(|s| s.to_string()).collect(),
	}
}

fn sample() -> RevisionRecord {
	let mut record = record(
		"514a3fb",
		&["sin", "mystery", "var2bytes", "print"],
		&["TK_EMPTY", "TK_IDENTIFIER", "TK_HOMEGROWN", "TK_EOF", "TK_MAX"],
	);
	record.changes = Changes {
		added_tokens: vec!["PUPPET".into(), "BOGUS".into()],
		added_functions: vec!["smoothstep".into()],
		arg_count_changed: vec![
			ArgCountChange::Name("var2bytes".into()),
			ArgCountChange::Name("bytes2var".into()),
		],
		..Changes::default()
	};
	record
}

fn parent() -> RevisionId {
	RevisionId::parse("1a36141").unwrap()
}

const SAMPLE_SOURCE: &str = r##"// This file is automatically generated by `bcrev`.
// Do not edit this file directly, as it will be overwritten.

// clang-format off
#include "core/io/marshalls.h"
#include "core/string/print_string.h"

#include "bytecode_514a3fb.h"

static const Pair<String, Pair<int, int>> funcs[] = {
	{ "sin", Pair<int, int>(1, 1) },
	{ "var2bytes", Pair<int, int>(1, 2) },
	{ "print", Pair<int, int>(0, INT_MAX) },
};

static constexpr int num_funcs = sizeof(funcs) / sizeof(Pair<String, Pair<int, int>>);

enum Token {
	TK_EMPTY,
	TK_IDENTIFIER,
	TK_HOMEGROWN,
	TK_EOF,
	TK_MAX,
};

int GDScriptDecomp_514a3fb::get_token_max() const {
	return TK_MAX;
}

String GDScriptDecomp_514a3fb::get_function_name(int p_func) const {
	if (p_func < 0 || p_func >= num_funcs) {
		return "";
	}
	return funcs[p_func].first;
}

int GDScriptDecomp_514a3fb::get_function_count() const {
	return num_funcs;
}

Pair<int, int> GDScriptDecomp_514a3fb::get_function_arg_count(int p_func) const {
	if (p_func < 0 || p_func >= num_funcs) {
		return Pair<int, int>(-1, -1);
	}
	return funcs[p_func].second;
}

int GDScriptDecomp_514a3fb::get_function_index(const String &p_func) const {
	for (int i = 0; i < num_funcs; i++) {
		if (funcs[i].first == p_func) {
			return i;
		}
	}
	return -1;
}

GDScriptDecomp::GlobalToken GDScriptDecomp_514a3fb::get_global_token(int p_token) const {
	if (p_token < 0 || p_token >= TK_MAX) {
		return GDScriptDecomp::GlobalToken::G_TK_MAX;
	}
	switch(Token(p_token)) {
		case TK_EMPTY: return GDScriptDecomp::GlobalToken::G_TK_EMPTY;
		case TK_IDENTIFIER: return GDScriptDecomp::GlobalToken::G_TK_IDENTIFIER;
		case TK_EOF: return GDScriptDecomp::GlobalToken::G_TK_EOF;
		default: return GDScriptDecomp::GlobalToken::G_TK_MAX;
	}
}

int GDScriptDecomp_514a3fb::get_local_token_val(GDScriptDecomp::GlobalToken p_token) const {
	switch(p_token) {
		case GDScriptDecomp::GlobalToken::G_TK_EMPTY: return (int) TK_EMPTY;
		case GDScriptDecomp::GlobalToken::G_TK_IDENTIFIER: return (int) TK_IDENTIFIER;
		case GDScriptDecomp::GlobalToken::G_TK_EOF: return (int) TK_EOF;
		case GDScriptDecomp::GlobalToken::G_TK_MAX: return (int) TK_MAX;
		default: return -1;
	}
}
"##;

const SAMPLE_HEADER: &str = r##"// This file is automatically generated by `bcrev`.
// Do not edit this file directly, as it will be overwritten.

// clang-format off
#pragma once

#include "bytecode_base.h"

class GDScriptDecomp_514a3fb : public GDScriptDecomp {
	GDCLASS(GDScriptDecomp_514a3fb, GDScriptDecomp);
protected:
	static void _bind_methods(){};
	static constexpr int bytecode_version = 13;
	static constexpr int bytecode_rev = 0x514a3fb;
	static constexpr int engine_ver_major = 3;
	static constexpr int variant_ver_major = 3;
	static constexpr const char *bytecode_rev_str = "514a3fb";
	static constexpr const char *engine_version = "3.1.1-stable";
	static constexpr const char *max_engine_version = "3.1.2-stable";
	static constexpr int parent = 0x1a36141;

	virtual Vector<GDScriptDecomp::GlobalToken> get_added_tokens() const override { return {GDScriptDecomp::GlobalToken::G_TK_PR_PUPPET}; }
	virtual Vector<String> get_added_functions() const override { return {"smoothstep"}; }
	virtual Vector<String> get_function_arg_count_changed() const override { return {"var2bytes", "bytes2var"}; }
public:
	virtual String get_function_name(int p_func) const override;
	virtual int get_function_count() const override;
	virtual Pair<int, int> get_function_arg_count(int p_func) const override;
	virtual int get_token_max() const override;
	virtual int get_function_index(const String &p_func) const override;
	virtual GDScriptDecomp::GlobalToken get_global_token(int p_token) const override;
	virtual int get_local_token_val(GDScriptDecomp::GlobalToken p_token) const override;
	virtual int get_bytecode_version() const override { return bytecode_version; }
	virtual int get_bytecode_rev() const override { return bytecode_rev; }
	virtual int get_engine_ver_major() const override { return engine_ver_major; }
	virtual int get_variant_ver_major() const override { return variant_ver_major; }
	virtual int get_parent() const override { return parent; }
	virtual String get_engine_version() const override { return engine_version; }
	virtual String get_max_engine_version() const override { return max_engine_version; }
	GDScriptDecomp_514a3fb() {}
};
"##;

#[test]
fn renders_the_implementation() {
	let record = sample();
	let source = render::render_source(&record.adapter(), &EmitConfig::default()).unwrap();
	assert_eq!(source, SAMPLE_SOURCE);
}

#[test]
fn renders_the_declaration() {
	let record = sample();
	let parent = parent();
	let header = render::render_header(&record.adapter(), Some(&parent), &EmitConfig::default()).unwrap();
	assert_eq!(header, SAMPLE_HEADER);
}

#[test]
fn oldest_revision_has_no_parent_and_no_overrides() {
	let record = record("0b806ee", &["sin"], &["TK_EMPTY", "TK_MAX"]);
	let header = render::render_header(&record.adapter(), None, &EmitConfig::default()).unwrap();
	assert!(header.contains("\tstatic constexpr int parent = 0;\npublic:\n"));
	assert!(!header.contains("get_added_tokens"));
}

#[test]
fn missing_local_sentinel_uses_the_token_count() {
	let record = record("0b806ee", &[], &["TK_EMPTY", "TK_EOF"]);
	let source = render::render_source(&record.adapter(), &EmitConfig::default()).unwrap();
	assert!(source.contains("\treturn 2;\n"));
	assert!(source.contains("p_token >= 2)"));
}

#[test]
fn naming_follows_the_config() {
	let config: EmitConfig = toml::from_str(
		r#"
file_prefix = "decomp"
class_prefix = "Decomp_"
canonical_enum = "Global"
canonical_prefix = ""
includes = []
"#,
	)
	.unwrap();
	let record = record("514a3fb", &["sin"], &["TK_EOF", "TK_MAX"]);
	let source = render::render_source(&record.adapter(), &config).unwrap();
	assert!(source.contains("#include \"decomp_514a3fb.h\""));
	assert!(source.contains("case TK_EOF: return Global::TK_EOF;"));
	assert!(source.contains("int Decomp_514a3fb::get_token_max() const {"));
	assert!(!source.contains("marshalls"));
}

#[test]
fn unknown_config_keys_are_rejected() {
	assert!(toml::from_str::<EmitConfig>("class_prefx = \"X\"").is_err());
}

#[test]
fn output_dir_is_a_sibling() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path().canonicalize().unwrap();
	std::fs::create_dir(root.join("bytecode")).unwrap();
	let out = default_output_dir(&root.join("bytecode")).unwrap();
	assert_eq!(out, root.join("bytecode2"));
}

#[test]
fn output_dir_resolves_dot_components() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path().canonicalize().unwrap();
	let input = root.join("bytecode");
	std::fs::create_dir_all(input.join("nested")).unwrap();

	let out = default_output_dir(&input.join(".")).unwrap();
	assert_eq!(out, root.join("bytecode2"));
	assert!(!out.starts_with(&input));

	let out = default_output_dir(&input.join("nested").join("..")).unwrap();
	assert_eq!(out, root.join("bytecode2"));
}

#[test]
fn output_dir_needs_an_existing_input() {
	let dir = tempfile::tempdir().unwrap();
	let err = default_output_dir(&dir.path().join("missing")).unwrap_err();
	assert!(matches!(err, EmitError::OutputDir { .. }));
}

#[test]
fn emit_all_writes_every_pair_deterministically() {
	let registry = Registry::from_records([
		sample(),
		record("1a36141", &["sin"], &["TK_EMPTY", "TK_MAX"]),
	])
	.unwrap();
	let dir = tempfile::tempdir().unwrap();
	let out = dir.path().join("bytecode2");

	let files = emit_all(&registry, &EmitConfig::default(), &out).unwrap();
	assert_eq!(files.len(), 2);
	assert_eq!(files[0].source, out.join("bytecode_514a3fb.cpp"));
	assert_eq!(std::fs::read_to_string(&files[0].header).unwrap(), SAMPLE_HEADER);
	let first = std::fs::read(&files[1].source).unwrap();

	emit_all(&registry, &EmitConfig::default(), &out).unwrap();
	assert_eq!(std::fs::read(&files[1].source).unwrap(), first);
	assert!(
		std::fs::read_to_string(&files[1].header)
			.unwrap()
			.contains("parent = 0;")
	);
}

proptest! {
	#[test]
	fn emitted_bounds_are_ordered(
		number in any::<u32>(),
		picks in prop::collection::vec(any::<prop::sample::Index>(), 0..30),
	) {
		let known: Vec<&str> = signatures::known_functions().collect();
		let names: Vec<&str> = picks.iter().map(|i| *i.get(&known)).collect();
		let record = record(&format!("{number:x}"), &names, &["TK_MAX"]);
		let adapter = record.adapter();
		prop_assert_eq!(adapter.function_count(), names.len());
		for function in adapter.functions() {
			if let Some(max) = function.arity.max {
				prop_assert!(function.arity.min <= max, "{}", function.name);
			}
		}
		let config = EmitConfig::default();
		prop_assert_eq!(render(&adapter, None, &config).unwrap(), render(&adapter, None, &config).unwrap());
	}
}
