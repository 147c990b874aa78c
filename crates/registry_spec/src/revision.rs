//! Revision identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted identifier; eight hex digits still fit in a `u32`.
const MAX_LEN: usize = 8;

/// A short hexadecimal commit key naming one bytecode revision, e.g. `514a3fb`.
///
/// The textual form is kept verbatim (it names generated files and classes),
/// while [`RevisionId::number`] gives the numeric form used by revision
/// allow-lists and by decoders that identify a revision by integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RevisionId(Box<str>);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid revision identifier '{0}' (expected 1-8 hex digits)")]
pub struct InvalidRevisionId(pub String);

impl RevisionId {
	pub fn parse(s: &str) -> Result<Self, InvalidRevisionId> {
		if s.is_empty() || s.len() > MAX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
			return Err(InvalidRevisionId(s.to_string()));
		}
		Ok(Self(s.into()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Numeric value of the identifier read as hexadecimal.
	pub fn number(&self) -> u32 {
		// Validated on construction: at most eight hex digits.
		u32::from_str_radix(&self.0, 16).unwrap_or_default()
	}
}

impl fmt::Display for RevisionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<String> for RevisionId {
	type Error = InvalidRevisionId;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<RevisionId> for String {
	fn from(value: RevisionId) -> Self {
		value.0.into()
	}
}

impl std::str::FromStr for RevisionId {
	type Err = InvalidRevisionId;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl AsRef<str> for RevisionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_short_hex_keys() {
		let id = RevisionId::parse("514a3fb").unwrap();
		assert_eq!(id.as_str(), "514a3fb");
		assert_eq!(id.number(), 0x514a3fb);
	}

	#[test]
	fn rejects_non_hex_and_oversized_keys() {
		assert!(RevisionId::parse("").is_err());
		assert!(RevisionId::parse("custom").is_err());
		assert!(RevisionId::parse("123456789").is_err());
	}
}
