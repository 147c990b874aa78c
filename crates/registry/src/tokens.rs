//! The canonical token enumeration.
//!
//! Every revision's local token list maps onto this enumeration by name. The
//! numeric positions are persisted in generated adapters, so entries are only
//! ever appended (directly before `TK_MAX`, which always stays last).

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

/// Canonical token names in enumeration order.
pub const CANONICAL_TOKENS: &[&str] = &[
	"TK_EMPTY",
	"TK_IDENTIFIER",
	"TK_CONSTANT",
	"TK_SELF",
	"TK_BUILT_IN_TYPE",
	"TK_BUILT_IN_FUNC",
	// operators
	"TK_OP_IN",
	"TK_OP_EQUAL",
	"TK_OP_NOT_EQUAL",
	"TK_OP_LESS",
	"TK_OP_LESS_EQUAL",
	"TK_OP_GREATER",
	"TK_OP_GREATER_EQUAL",
	"TK_OP_AND",
	"TK_OP_OR",
	"TK_OP_NOT",
	"TK_OP_ADD",
	"TK_OP_SUB",
	"TK_OP_MUL",
	"TK_OP_DIV",
	"TK_OP_MOD",
	"TK_OP_SHIFT_LEFT",
	"TK_OP_SHIFT_RIGHT",
	"TK_OP_ASSIGN",
	"TK_OP_ASSIGN_ADD",
	"TK_OP_ASSIGN_SUB",
	"TK_OP_ASSIGN_MUL",
	"TK_OP_ASSIGN_DIV",
	"TK_OP_ASSIGN_MOD",
	"TK_OP_ASSIGN_SHIFT_LEFT",
	"TK_OP_ASSIGN_SHIFT_RIGHT",
	"TK_OP_ASSIGN_BIT_AND",
	"TK_OP_ASSIGN_BIT_OR",
	"TK_OP_ASSIGN_BIT_XOR",
	"TK_OP_BIT_AND",
	"TK_OP_BIT_OR",
	"TK_OP_BIT_XOR",
	"TK_OP_BIT_INVERT",
	// control flow
	"TK_CF_IF",
	"TK_CF_ELIF",
	"TK_CF_ELSE",
	"TK_CF_FOR",
	"TK_CF_WHILE",
	"TK_CF_BREAK",
	"TK_CF_CONTINUE",
	"TK_CF_PASS",
	"TK_CF_RETURN",
	"TK_CF_MATCH",
	// keywords
	"TK_PR_FUNCTION",
	"TK_PR_CLASS",
	"TK_PR_CLASS_NAME",
	"TK_PR_EXTENDS",
	"TK_PR_IS",
	"TK_PR_ONREADY",
	"TK_PR_TOOL",
	"TK_PR_STATIC",
	"TK_PR_EXPORT",
	"TK_PR_SETGET",
	"TK_PR_CONST",
	"TK_PR_VAR",
	"TK_PR_AS",
	"TK_PR_VOID",
	"TK_PR_ENUM",
	"TK_PR_PRELOAD",
	"TK_PR_ASSERT",
	"TK_PR_YIELD",
	"TK_PR_SIGNAL",
	"TK_PR_BREAKPOINT",
	"TK_PR_REMOTE",
	"TK_PR_SYNC",
	"TK_PR_MASTER",
	"TK_PR_SLAVE",
	"TK_PR_PUPPET",
	"TK_PR_REMOTESYNC",
	"TK_PR_MASTERSYNC",
	"TK_PR_PUPPETSYNC",
	// punctuation
	"TK_BRACKET_OPEN",
	"TK_BRACKET_CLOSE",
	"TK_CURLY_BRACKET_OPEN",
	"TK_CURLY_BRACKET_CLOSE",
	"TK_PARENTHESIS_OPEN",
	"TK_PARENTHESIS_CLOSE",
	"TK_COMMA",
	"TK_SEMICOLON",
	"TK_PERIOD",
	"TK_QUESTION_MARK",
	"TK_COLON",
	"TK_DOLLAR",
	"TK_FORWARD_ARROW",
	"TK_NEWLINE",
	"TK_CONST_PI",
	"TK_CONST_TAU",
	"TK_WILDCARD",
	"TK_CONST_INF",
	"TK_CONST_NAN",
	"TK_ERROR",
	"TK_EOF",
	"TK_CURSOR",
	// appended after the initial enumeration
	"TK_PR_SLAVESYNC",
	"TK_CF_DO",
	"TK_CF_CASE",
	"TK_CF_SWITCH",
	"TK_ANNOTATION",
	"TK_AMPERSAND_AMPERSAND",
	"TK_PIPE_PIPE",
	"TK_BANG",
	"TK_STAR_STAR",
	"TK_STAR_STAR_EQUAL",
	"TK_CF_WHEN",
	"TK_PR_AWAIT",
	"TK_PR_NAMESPACE",
	"TK_PR_SUPER",
	"TK_PR_TRAIT",
	"TK_PERIOD_PERIOD",
	"TK_UNDERSCORE",
	"TK_INDENT",
	"TK_DEDENT",
	"TK_VCS_CONFLICT_MARKER",
	"TK_BACKTICK",
	"TK_ABSTRACT",
	"TK_PERIOD_PERIOD_PERIOD",
	"TK_MAX",
];

static BY_NAME: LazyLock<HashMap<&'static str, CanonicalToken>> = LazyLock::new(|| {
	CANONICAL_TOKENS
		.iter()
		.enumerate()
		.map(|(i, &name)| (name, CanonicalToken(i as u16)))
		.collect()
});

/// A value of the canonical token enumeration.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CanonicalToken(u16);

impl CanonicalToken {
	/// The unknown/max sentinel, always the final entry.
	pub const MAX: Self = Self((CANONICAL_TOKENS.len() - 1) as u16);

	/// Looks up a canonical token by exact name.
	pub fn from_name(name: &str) -> Option<Self> {
		BY_NAME.get(name).copied()
	}

	/// Resolves a delta-style short name (`PUPPET`, `CONST_TAU`, `DO`) by
	/// trying the plain, keyword and control-flow spellings in that order.
	pub fn resolve_short(name: &str) -> Option<Self> {
		if name.starts_with("TK_") {
			return Self::from_name(name);
		}
		["TK_", "TK_PR_", "TK_CF_"]
			.iter()
			.find_map(|prefix| Self::from_name(&format!("{prefix}{name}")))
	}

	pub fn from_index(index: usize) -> Option<Self> {
		(index < CANONICAL_TOKENS.len()).then_some(Self(index as u16))
	}

	pub fn index(self) -> usize {
		self.0 as usize
	}

	pub fn name(self) -> &'static str {
		CANONICAL_TOKENS[self.index()]
	}

	pub fn is_max(self) -> bool {
		self == Self::MAX
	}

	/// All canonical values in enumeration order, including the sentinel.
	pub fn all() -> impl Iterator<Item = Self> {
		(0..CANONICAL_TOKENS.len()).map(|i| Self(i as u16))
	}
}

impl fmt::Display for CanonicalToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
