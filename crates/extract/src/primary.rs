//! Block extraction from the primary artifact.
//!
//! A block opens at a line starting with its marker and closes at the next
//! line starting with `};`. Each remaining line holds at most one name.

use std::fmt;

/// Line prefix closing every block.
pub const CLOSE_MARKER: &str = "};";

/// The two name lists a primary artifact carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
	Functions,
	Tokens,
}

impl BlockKind {
	/// Line prefix that opens this block.
	pub fn marker(self) -> &'static str {
		match self {
			Self::Functions => "static const char *func_names[]",
			Self::Tokens => "enum Token {",
		}
	}
}

impl fmt::Display for BlockKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Functions => "function",
			Self::Tokens => "token",
		})
	}
}

/// Outcome of looking for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
	/// The opening marker does not occur.
	Missing,
	Found(Vec<String>),
}

impl Block {
	pub fn names(&self) -> &[String] {
		match self {
			Self::Missing => &[],
			Self::Found(names) => names,
		}
	}

	pub fn into_names(self) -> Vec<String> {
		match self {
			Self::Missing => Vec::new(),
			Self::Found(names) => names,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.names().is_empty()
	}
}

/// Both blocks of one primary artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryBlocks {
	pub functions: Block,
	pub tokens: Block,
}

impl PrimaryBlocks {
	pub fn parse(source: &str) -> Self {
		Self {
			functions: extract_block(source, BlockKind::Functions),
			tokens: extract_block(source, BlockKind::Tokens),
		}
	}

	pub fn get(&self, kind: BlockKind) -> &Block {
		match kind {
			BlockKind::Functions => &self.functions,
			BlockKind::Tokens => &self.tokens,
		}
	}
}

/// Collects the names of the first `kind` block in `source`.
pub fn extract_block(source: &str, kind: BlockKind) -> Block {
	let mut lines = source.lines();
	if !lines.by_ref().any(|line| line.starts_with(kind.marker())) {
		return Block::Missing;
	}
	let mut names = Vec::new();
	for line in lines {
		let line = strip_comment(line).trim_matches(',').trim();
		if line.starts_with(CLOSE_MARKER) {
			break;
		}
		if line.is_empty() {
			continue;
		}
		names.push(line.trim_matches('"').to_string());
	}
	Block::Found(names)
}

/// Removes a `//` comment and surrounding whitespace.
pub(crate) fn strip_comment(line: &str) -> &str {
	let line = line.trim();
	match line.find("//") {
		Some(at) => line[..at].trim(),
		None => line,
	}
}
