//! Per-revision change records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::RevisionId;

/// One hand-curated history entry: what changed at `id` relative to the
/// next older revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionDelta {
	pub id: RevisionId,
	#[serde(flatten)]
	pub changes: Changes,
}

/// Token and function changes introduced by a revision.
///
/// Field names match the manifest keys, so the same struct is flattened into
/// both the history asset and manifest records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
	#[serde(default)]
	pub added_tokens: Vec<String>,
	#[serde(default)]
	pub removed_tokens: Vec<String>,
	#[serde(default)]
	pub added_functions: Vec<String>,
	#[serde(default)]
	pub removed_functions: Vec<String>,
	#[serde(default)]
	pub arg_count_changed: Vec<ArgCountChange>,
	#[serde(default)]
	pub tokens_renamed: Vec<TokenRename>,
}

impl Changes {
	pub fn is_empty(&self) -> bool {
		self.added_tokens.is_empty()
			&& self.removed_tokens.is_empty()
			&& self.added_functions.is_empty()
			&& self.removed_functions.is_empty()
			&& self.arg_count_changed.is_empty()
			&& self.tokens_renamed.is_empty()
	}

	/// Returns the first name listed as both added and removed, if any.
	pub fn conflict(&self) -> Option<&str> {
		fn overlap<'a>(added: &'a [String], removed: &[String]) -> Option<&'a str> {
			added.iter().find(|name| removed.contains(name)).map(String::as_str)
		}
		overlap(&self.added_tokens, &self.removed_tokens)
			.or_else(|| overlap(&self.added_functions, &self.removed_functions))
	}
}

/// A function whose argument-count contract changed at a revision.
///
/// Either the function itself (`"var2bytes"`), or an `(old, new)` pair where a
/// function was renamed or split while keeping a compatible signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgCountChange {
	Name(String),
	Pair(String, String),
}

impl ArgCountChange {
	/// Function names this change mentions, in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		let (first, second) = match self {
			Self::Name(name) => (name.as_str(), None),
			Self::Pair(old, new) => (old.as_str(), Some(new.as_str())),
		};
		std::iter::once(first).chain(second)
	}
}

/// A token renamed at a revision. Serialized as a single-entry `{ old = "new" }` map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct TokenRename {
	pub from: String,
	pub to: String,
}

impl TokenRename {
	pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			to: to.into(),
		}
	}
}

impl TryFrom<BTreeMap<String, String>> for TokenRename {
	type Error = String;

	fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
		let mut entries = map.into_iter();
		match (entries.next(), entries.next()) {
			(Some((from, to)), None) => Ok(Self { from, to }),
			_ => Err("token rename must be a single `old = \"new\"` entry".to_string()),
		}
	}
}

impl From<TokenRename> for BTreeMap<String, String> {
	fn from(rename: TokenRename) -> Self {
		BTreeMap::from([(rename.from, rename.to)])
	}
}
