//! C++ text for one revision adapter.
//!
//! Output depends only on the record, its parent and the config, so the same
//! inputs always render byte-identical text.

use std::fmt::Write;

use bcrev_registry::{Adapter, Arity, CanonicalToken, LOCAL_TOKEN_MAX};
use bcrev_registry_spec::RevisionId;

use crate::config::EmitConfig;
use crate::error::Result;

/// Upper bound written for builtins taking any number of arguments.
const UNBOUNDED: &str = "INT_MAX";
const PAIR: &str = "Pair<int, int>";

/// Rendered implementation and declaration text of one adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
	pub source: String,
	pub header: String,
}

/// Renders both artifacts for `adapter`.
pub fn render(adapter: &Adapter<'_>, parent: Option<&RevisionId>, config: &EmitConfig) -> Result<Rendered> {
	Ok(Rendered {
		source: render_source(adapter, config)?,
		header: render_header(adapter, parent, config)?,
	})
}

fn banner(out: &mut String, config: &EmitConfig) -> std::fmt::Result {
	writeln!(out, "// This file is automatically generated by `{}`.", config.generator)?;
	writeln!(out, "// Do not edit this file directly, as it will be overwritten.")?;
	writeln!(out)?;
	writeln!(out, "// clang-format off")
}

fn quoted<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
	names.into_iter().map(|name| format!("\"{name}\"")).collect()
}

fn arity(arity: Arity) -> String {
	match arity.max {
		Some(max) => format!("{PAIR}({}, {max})", arity.min),
		None => format!("{PAIR}({}, {UNBOUNDED})", arity.min),
	}
}

/// Renders the implementation file.
pub fn render_source(adapter: &Adapter<'_>, config: &EmitConfig) -> Result<String> {
	let rev = adapter.id().as_str();
	let class = config.class_name(rev);
	let canonical_max = config.canonical(LOCAL_TOKEN_MAX);
	let token_max = if adapter.declares_token_max() {
		LOCAL_TOKEN_MAX.to_string()
	} else {
		adapter.token_max().to_string()
	};

	let mut out = String::new();
	banner(&mut out, config)?;
	for include in &config.includes {
		writeln!(out, "#include \"{include}\"")?;
	}
	writeln!(out)?;
	writeln!(out, "#include \"{}.h\"", config.file_stem(rev))?;
	writeln!(out)?;

	writeln!(out, "static const Pair<String, {PAIR}> funcs[] = {{")?;
	for function in adapter.functions() {
		writeln!(out, "\t{{ \"{}\", {} }},", function.name, arity(function.arity))?;
	}
	writeln!(out, "}};")?;
	writeln!(out)?;
	writeln!(out, "static constexpr int num_funcs = sizeof(funcs) / sizeof(Pair<String, {PAIR}>);")?;
	writeln!(out)?;

	writeln!(out, "enum Token {{")?;
	for token in adapter.tokens() {
		writeln!(out, "\t{},", token.name)?;
	}
	writeln!(out, "}};")?;
	writeln!(out)?;

	writeln!(out, "int {class}::get_token_max() const {{")?;
	writeln!(out, "\treturn {token_max};")?;
	writeln!(out, "}}")?;
	writeln!(out)?;

	writeln!(out, "String {class}::get_function_name(int p_func) const {{")?;
	writeln!(out, "\tif (p_func < 0 || p_func >= num_funcs) {{")?;
	writeln!(out, "\t\treturn \"\";")?;
	writeln!(out, "\t}}")?;
	writeln!(out, "\treturn funcs[p_func].first;")?;
	writeln!(out, "}}")?;
	writeln!(out)?;

	writeln!(out, "int {class}::get_function_count() const {{")?;
	writeln!(out, "\treturn num_funcs;")?;
	writeln!(out, "}}")?;
	writeln!(out)?;

	writeln!(out, "{PAIR} {class}::get_function_arg_count(int p_func) const {{")?;
	writeln!(out, "\tif (p_func < 0 || p_func >= num_funcs) {{")?;
	writeln!(out, "\t\treturn {PAIR}(-1, -1);")?;
	writeln!(out, "\t}}")?;
	writeln!(out, "\treturn funcs[p_func].second;")?;
	writeln!(out, "}}")?;
	writeln!(out)?;

	writeln!(out, "int {class}::get_function_index(const String &p_func) const {{")?;
	writeln!(out, "\tfor (int i = 0; i < num_funcs; i++) {{")?;
	writeln!(out, "\t\tif (funcs[i].first == p_func) {{")?;
	writeln!(out, "\t\t\treturn i;")?;
	writeln!(out, "\t\t}}")?;
	writeln!(out, "\t}}")?;
	writeln!(out, "\treturn -1;")?;
	writeln!(out, "}}")?;
	writeln!(out)?;

	writeln!(out, "{} {class}::get_global_token(int p_token) const {{", config.canonical_enum)?;
	writeln!(out, "\tif (p_token < 0 || p_token >= {token_max}) {{")?;
	writeln!(out, "\t\treturn {canonical_max};")?;
	writeln!(out, "\t}}")?;
	writeln!(out, "\tswitch(Token(p_token)) {{")?;
	for token in adapter.tokens().iter().take(adapter.token_max()) {
		if let Some(canonical) = token.canonical {
			writeln!(out, "\t\tcase {}: return {};", token.name, config.canonical(canonical.name()))?;
		}
	}
	writeln!(out, "\t\tdefault: return {canonical_max};")?;
	writeln!(out, "\t}}")?;
	writeln!(out, "}}")?;
	writeln!(out)?;

	writeln!(out, "int {class}::get_local_token_val({} p_token) const {{", config.canonical_enum)?;
	writeln!(out, "\tswitch(p_token) {{")?;
	for token in adapter.tokens() {
		if let Some(canonical) = token.canonical
			&& adapter.local_token(canonical) == Some(token.index)
		{
			writeln!(out, "\t\tcase {}: return (int) {};", config.canonical(canonical.name()), token.name)?;
		}
	}
	writeln!(out, "\t\tdefault: return -1;")?;
	writeln!(out, "\t}}")?;
	writeln!(out, "}}")?;
	Ok(out)
}

/// Renders the declaration file.
pub fn render_header(adapter: &Adapter<'_>, parent: Option<&RevisionId>, config: &EmitConfig) -> Result<String> {
	let record = adapter.record();
	let rev = record.id.as_str();
	let class = config.class_name(rev);
	let base = &config.base_class;
	let changes = &record.changes;

	let mut out = String::new();
	banner(&mut out, config)?;
	writeln!(out, "#pragma once")?;
	writeln!(out)?;
	writeln!(out, "#include \"{}\"", config.base_header)?;
	writeln!(out)?;
	writeln!(out, "class {class} : public {base} {{")?;
	writeln!(out, "\tGDCLASS({class}, {base});")?;
	writeln!(out, "protected:")?;
	writeln!(out, "\tstatic void _bind_methods(){{}};")?;
	writeln!(out, "\tstatic constexpr int bytecode_version = {};", record.format_version)?;
	writeln!(out, "\tstatic constexpr int bytecode_rev = 0x{rev};")?;
	writeln!(out, "\tstatic constexpr int engine_ver_major = {};", record.engine_major)?;
	writeln!(out, "\tstatic constexpr int variant_ver_major = {};", record.variant_major)?;
	writeln!(out, "\tstatic constexpr const char *bytecode_rev_str = \"{rev}\";")?;
	writeln!(out, "\tstatic constexpr const char *engine_version = \"{}\";", record.release.version)?;
	writeln!(out, "\tstatic constexpr const char *max_engine_version = \"{}\";", record.release.max_version)?;
	match parent {
		Some(parent) => writeln!(out, "\tstatic constexpr int parent = 0x{parent};")?,
		None => writeln!(out, "\tstatic constexpr int parent = 0;")?,
	}

	let token_list = |names: &[String]| -> Vec<String> {
		names
			.iter()
			.filter_map(|name| match CanonicalToken::resolve_short(name) {
				Some(token) => Some(config.canonical(token.name())),
				None => {
					tracing::warn!(rev, token = %name, "delta token has no canonical counterpart");
					None
				}
			})
			.collect()
	};
	let token_vector = format!("Vector<{}>", config.canonical_enum);
	let overrides = [
		(token_vector.as_str(), "get_added_tokens", token_list(&changes.added_tokens)),
		(token_vector.as_str(), "get_removed_tokens", token_list(&changes.removed_tokens)),
		(
			"Vector<String>",
			"get_added_functions",
			quoted(changes.added_functions.iter().map(String::as_str)),
		),
		(
			"Vector<String>",
			"get_removed_functions",
			quoted(changes.removed_functions.iter().map(String::as_str)),
		),
		(
			"Vector<String>",
			"get_function_arg_count_changed",
			quoted(changes.arg_count_changed.iter().flat_map(|change| change.names())),
		),
	];
	if overrides.iter().any(|(_, _, values)| !values.is_empty()) {
		writeln!(out)?;
	}
	for (ty, method, values) in &overrides {
		if !values.is_empty() {
			writeln!(out, "\tvirtual {ty} {method}() const override {{ return {{{}}}; }}", values.join(", "))?;
		}
	}

	writeln!(out, "public:")?;
	writeln!(out, "\tvirtual String get_function_name(int p_func) const override;")?;
	writeln!(out, "\tvirtual int get_function_count() const override;")?;
	writeln!(out, "\tvirtual {PAIR} get_function_arg_count(int p_func) const override;")?;
	writeln!(out, "\tvirtual int get_token_max() const override;")?;
	writeln!(out, "\tvirtual int get_function_index(const String &p_func) const override;")?;
	writeln!(out, "\tvirtual {} get_global_token(int p_token) const override;", config.canonical_enum)?;
	writeln!(out, "\tvirtual int get_local_token_val({} p_token) const override;", config.canonical_enum)?;
	writeln!(out, "\tvirtual int get_bytecode_version() const override {{ return bytecode_version; }}")?;
	writeln!(out, "\tvirtual int get_bytecode_rev() const override {{ return bytecode_rev; }}")?;
	writeln!(out, "\tvirtual int get_engine_ver_major() const override {{ return engine_ver_major; }}")?;
	writeln!(out, "\tvirtual int get_variant_ver_major() const override {{ return variant_ver_major; }}")?;
	writeln!(out, "\tvirtual int get_parent() const override {{ return parent; }}")?;
	writeln!(out, "\tvirtual String get_engine_version() const override {{ return engine_version; }}")?;
	writeln!(out, "\tvirtual String get_max_engine_version() const override {{ return max_engine_version; }}")?;
	writeln!(out, "\t{class}() {{}}")?;
	writeln!(out, "}};")?;
	Ok(out)
}
