//! File system engine
//!
//! The in-memory directory tree, file content buffers, and handle state.
//! Engine operations return structured results; rendering them is the
//! dispatcher's job.

pub mod content;
pub mod node;
pub mod results;
pub mod tree;

pub use content::FileNode;
pub use results::{ChdirOutcome, DirListing, EntryKind, MapEntry, ReadSlice, TruncateOutcome};
pub use tree::DirectoryTree;
