//! Extraction of per-revision facts from source artifacts.
//!
//! Each revision ships a primary artifact (`<prefix>_<rev>.cpp`) holding its
//! builtin function and token lists, and a declaration artifact
//! (`<prefix>_<rev>.h`) holding four scalar facts. [`extract`] turns one such
//! pair into a [`Snapshot`] for the registry builder.

use std::path::Path;

use bcrev_registry::Snapshot;
use bcrev_registry_spec::RevisionId;
use rustc_hash::FxHashSet as HashSet;

pub mod declaration;
pub mod discover;
mod error;
pub mod primary;

pub use declaration::Declaration;
pub use discover::{ArtifactPair, DEFAULT_EXCLUDED_SUFFIXES, Layout, discover};
pub use error::{ExtractError, Result};
pub use primary::{Block, BlockKind, PrimaryBlocks, extract_block};

/// How to treat a block that is missing or has no entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyBlockPolicy {
	/// Log a warning and continue with an empty list.
	#[default]
	Warn,
	/// Fail the revision.
	Deny,
}

/// Reads both artifacts of `pair` and assembles its snapshot.
pub fn extract(pair: &ArtifactPair, policy: EmptyBlockPolicy) -> Result<Snapshot> {
	let source = read(&pair.source)?;
	let declaration = read(&pair.declaration)?;
	let blocks = PrimaryBlocks::parse(&source);
	for kind in [BlockKind::Functions, BlockKind::Tokens] {
		check_block(&pair.id, kind, blocks.get(kind), policy)?;
	}
	let decl = Declaration::parse(&declaration, &pair.id)?;
	tracing::debug!(
		rev = %pair.id,
		functions = blocks.functions.names().len(),
		tokens = blocks.tokens.names().len(),
		"artifact extracted"
	);
	Ok(Snapshot {
		id: pair.id.clone(),
		format_version: decl.format_version,
		declared_number: decl.revision_number,
		engine_major: decl.engine_major,
		variant_major: decl.variant_major,
		functions: blocks.functions.into_names(),
		tokens: blocks.tokens.into_names(),
	})
}

fn check_block(rev: &RevisionId, kind: BlockKind, block: &Block, policy: EmptyBlockPolicy) -> Result<()> {
	if block.is_empty() {
		if policy == EmptyBlockPolicy::Deny {
			return Err(ExtractError::EmptyBlock {
				rev: rev.clone(),
				block: kind,
			});
		}
		match block {
			Block::Missing => tracing::warn!(rev = %rev, block = %kind, "block marker not found"),
			Block::Found(_) => tracing::warn!(rev = %rev, block = %kind, "block is empty"),
		}
		return Ok(());
	}
	let mut seen = HashSet::default();
	for name in block.names() {
		if !seen.insert(name.as_str()) {
			return Err(ExtractError::DuplicateName {
				rev: rev.clone(),
				block: kind,
				name: name.clone(),
			});
		}
	}
	Ok(())
}

fn read(path: &Path) -> Result<String> {
	std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
		path: path.to_path_buf(),
		source,
	})
}
