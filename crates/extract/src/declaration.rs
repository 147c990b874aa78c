//! Scalar facts from the declaration artifact.

use bcrev_registry_spec::RevisionId;

use crate::error::{ExtractError, Result};
use crate::primary::strip_comment;

const FORMAT_VERSION: &str = "bytecode_version";
const REVISION: &str = "bytecode_rev";
const ENGINE_MAJOR: &str = "engine_ver_major";
const VARIANT_MAJOR: &str = "variant_ver_major";

/// Words allowed in front of a scalar's name.
const QUALIFIERS: &[&str] = &[
	"static", "const", "constexpr", "inline", "unsigned", "signed", "int", "long", "short",
	"uint32_t", "int32_t", "uint64_t", "int64_t",
];

/// The four scalars every declaration artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration {
	pub format_version: u32,
	pub revision_number: u32,
	pub engine_major: u32,
	pub variant_major: u32,
}

impl Declaration {
	/// Scans `source` for the four scalars; the first assignment of each wins.
	pub fn parse(source: &str, rev: &RevisionId) -> Result<Self> {
		let mut format_version = None;
		let mut revision_number = None;
		let mut engine_major = None;
		let mut variant_major = None;

		for line in source.lines() {
			let Some((name, value)) = scalar_assignment(line) else {
				continue;
			};
			let (slot, radix) = match name {
				FORMAT_VERSION => (&mut format_version, 10),
				REVISION => (&mut revision_number, 16),
				ENGINE_MAJOR => (&mut engine_major, 10),
				VARIANT_MAJOR => (&mut variant_major, 10),
				_ => continue,
			};
			if slot.is_none() {
				*slot = Some(parse_value(rev, name, value, radix)?);
			}
		}

		let require = |slot: Option<u32>, name: &'static str| {
			slot.ok_or_else(|| ExtractError::MissingScalar {
				rev: rev.clone(),
				name,
			})
		};
		Ok(Self {
			format_version: require(format_version, FORMAT_VERSION)?,
			revision_number: require(revision_number, REVISION)?,
			engine_major: require(engine_major, ENGINE_MAJOR)?,
			variant_major: require(variant_major, VARIANT_MAJOR)?,
		})
	}
}

/// Splits `[qualifiers] name = value;` into its name and value.
fn scalar_assignment(line: &str) -> Option<(&'static str, &str)> {
	let (lhs, rhs) = strip_comment(line).split_once('=')?;
	let mut words = lhs.split_whitespace().rev();
	let last = words.next()?;
	if !words.all(|word| QUALIFIERS.contains(&word)) {
		return None;
	}
	let name = [FORMAT_VERSION, REVISION, ENGINE_MAJOR, VARIANT_MAJOR]
		.into_iter()
		.find(|name| *name == last)?;
	Some((name, rhs.trim().trim_end_matches(';').trim()))
}

fn parse_value(rev: &RevisionId, name: &'static str, value: &str, radix: u32) -> Result<u32> {
	let digits = match radix {
		16 => value
			.strip_prefix("0x")
			.or_else(|| value.strip_prefix("0X"))
			.unwrap_or(value),
		_ => value,
	};
	u32::from_str_radix(digits, radix).map_err(|_| ExtractError::InvalidScalar {
		rev: rev.clone(),
		name,
		value: value.to_string(),
	})
}
