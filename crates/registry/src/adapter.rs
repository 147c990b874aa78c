//! Lookup and translation view over one revision record.
//!
//! This is the operation set every generated adapter implements. The emitter
//! renders it as source text; tests and tools use it directly.

use bcrev_registry_spec::RevisionId;
use rustc_hash::FxHashMap as HashMap;

use crate::record::RevisionRecord;
use crate::signatures::{self, Arity};
use crate::tokens::CanonicalToken;

/// Local name of the token-count sentinel in every revision's enumeration.
pub const LOCAL_TOKEN_MAX: &str = "TK_MAX";

/// A builtin function with a resolved argument-count bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSignature<'a> {
	pub name: &'a str,
	pub arity: Arity,
}

/// A local token and its canonical counterpart, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMapping<'a> {
	pub index: usize,
	pub name: &'a str,
	pub canonical: Option<CanonicalToken>,
}

/// Resolved lookup tables for one revision.
///
/// Function indices address the resolved table: functions without a known
/// signature are omitted, so later entries shift down.
#[derive(Debug, Clone)]
pub struct Adapter<'a> {
	record: &'a RevisionRecord,
	functions: Vec<FunctionSignature<'a>>,
	tokens: Vec<TokenMapping<'a>>,
	local_by_canonical: HashMap<CanonicalToken, usize>,
	token_max: usize,
}

impl<'a> Adapter<'a> {
	pub fn new(record: &'a RevisionRecord) -> Self {
		let functions = record
			.functions
			.iter()
			.filter_map(|name| match signatures::resolve(name, &record.id) {
				Some(arity) => Some(FunctionSignature { name, arity }),
				None => {
					tracing::debug!(rev = %record.id, function = %name, "no known signature, omitting");
					None
				}
			})
			.collect();

		let mut tokens = Vec::with_capacity(record.tokens.len());
		let mut local_by_canonical = HashMap::default();
		for (index, name) in record.tokens.iter().enumerate() {
			let canonical = CanonicalToken::from_name(name);
			match canonical {
				Some(canonical) => {
					local_by_canonical.entry(canonical).or_insert(index);
				}
				None => {
					tracing::warn!(rev = %record.id, token = %name, "local token has no canonical counterpart")
				}
			}
			tokens.push(TokenMapping {
				index,
				name,
				canonical,
			});
		}

		let token_max = record
			.tokens
			.iter()
			.position(|name| name == LOCAL_TOKEN_MAX)
			.unwrap_or(record.tokens.len());

		Self {
			record,
			functions,
			tokens,
			local_by_canonical,
			token_max,
		}
	}

	pub fn record(&self) -> &'a RevisionRecord {
		self.record
	}

	pub fn id(&self) -> &'a RevisionId {
		&self.record.id
	}

	/// The resolved function table in function-list order.
	pub fn functions(&self) -> &[FunctionSignature<'a>] {
		&self.functions
	}

	pub fn function_count(&self) -> usize {
		self.functions.len()
	}

	pub fn function_name(&self, index: usize) -> Option<&'a str> {
		self.functions.get(index).map(|f| f.name)
	}

	pub fn function_arity(&self, index: usize) -> Option<Arity> {
		self.functions.get(index).map(|f| f.arity)
	}

	pub fn function_index(&self, name: &str) -> Option<usize> {
		self.functions.iter().position(|f| f.name == name)
	}

	/// Local index of `TK_MAX`, or the token count when the enumeration has none.
	pub fn token_max(&self) -> usize {
		self.token_max
	}

	/// Whether the local enumeration declares its own `TK_MAX` entry.
	pub fn declares_token_max(&self) -> bool {
		self.token_max < self.tokens.len()
	}

	/// Every local token in record order with its canonical counterpart.
	pub fn tokens(&self) -> &[TokenMapping<'a>] {
		&self.tokens
	}

	/// Local tokens that have no canonical counterpart.
	pub fn unmapped_tokens(&self) -> impl Iterator<Item = &'a str> {
		self.tokens.iter().filter(|t| t.canonical.is_none()).map(|t| t.name)
	}

	/// Translates a local token index to the canonical enumeration.
	///
	/// Indices at or past the local `TK_MAX` and names without a canonical
	/// counterpart translate to [`CanonicalToken::MAX`].
	pub fn global_token(&self, local: usize) -> CanonicalToken {
		if local >= self.token_max {
			return CanonicalToken::MAX;
		}
		self.tokens[local].canonical.unwrap_or(CanonicalToken::MAX)
	}

	/// Translates a canonical token to this revision's local index.
	pub fn local_token(&self, canonical: CanonicalToken) -> Option<usize> {
		self.local_by_canonical.get(&canonical).copied()
	}
}
