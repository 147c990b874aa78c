//! Hand-curated bytecode revision history.
//!
//! Each tracked compiler revision records which tokens and builtin functions it
//! added, removed or renamed, together with the engine release it shipped in.
//! This crate owns that dataset and its validation; resolving it against
//! extracted artifacts happens in `bcrev-registry`.

pub mod delta;
pub mod history;
pub mod release;
pub mod revision;

pub use delta::{ArgCountChange, Changes, RevisionDelta, TokenRename};
pub use history::{HistoryEntry, HistoryError, HistoryStore};
pub use release::{DEV_MARKER, InvalidLabel, Release, ReleaseLabel, ReleaseMeta, Stage};
pub use revision::{InvalidRevisionId, RevisionId};
