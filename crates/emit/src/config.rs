use serde::{Deserialize, Serialize};

/// Naming of generated files and of the C++ decoder framework they plug into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitConfig {
	/// Stem prefix of generated files, joined to the revision by `_`.
	pub file_prefix: String,
	/// Class name prefix; the revision is appended verbatim.
	pub class_prefix: String,
	pub base_class: String,
	/// Header declaring `base_class`.
	pub base_header: String,
	/// Fully qualified canonical token enum.
	pub canonical_enum: String,
	/// Prefix of canonical enum members in front of the `TK_` name.
	pub canonical_prefix: String,
	/// Extra includes at the top of every implementation file.
	pub includes: Vec<String>,
	/// Tool name written into the generated-file banner.
	pub generator: String,
}

impl Default for EmitConfig {
	fn default() -> Self {
		Self {
			file_prefix: "bytecode".to_string(),
			class_prefix: "GDScriptDecomp_".to_string(),
			base_class: "GDScriptDecomp".to_string(),
			base_header: "bytecode_base.h".to_string(),
			canonical_enum: "GDScriptDecomp::GlobalToken".to_string(),
			canonical_prefix: "G_".to_string(),
			includes: vec![
				"core/io/marshalls.h".to_string(),
				"core/string/print_string.h".to_string(),
			],
			generator: "bcrev".to_string(),
		}
	}
}

impl EmitConfig {
	pub fn file_stem(&self, rev: &str) -> String {
		format!("{}_{rev}", self.file_prefix)
	}

	pub fn class_name(&self, rev: &str) -> String {
		format!("{}{rev}", self.class_prefix)
	}

	/// Qualified canonical member for a `TK_` name.
	pub fn canonical(&self, name: &str) -> String {
		format!("{}::{}{name}", self.canonical_enum, self.canonical_prefix)
	}
}
