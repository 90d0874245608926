//! Result types for filesystem operations
//!
//! Structured results handed back to the dispatcher; the engine never
//! renders output itself.

/// Outcome of a chdir request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChdirOutcome {
    /// Entered the named subdirectory.
    Entered,
    /// Moved to the parent directory.
    MovedUp,
    /// `..` at the root; the cursor did not move and that is not an error.
    AlreadyAtRoot,
}

/// Outcome of a truncate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncateOutcome {
    Truncated,
    /// Requested size was at or past the current length; nothing was cut.
    KeptAsIs,
}

/// Listing of the current directory: subdirectories then files, each in
/// name order.
#[derive(Debug, Clone)]
pub struct DirListing {
    pub dir_name: String,
    pub subdirs: Vec<String>,
    pub files: Vec<String>,
}

impl DirListing {
    pub fn is_empty(&self) -> bool {
        self.subdirs.is_empty() && self.files.is_empty()
    }
}

/// Entry kind in a memory map dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One line of the recursive memory map: preorder position plus depth.
#[derive(Debug, Clone)]
pub struct MapEntry {
    pub depth: usize,
    pub kind: EntryKind,
    pub name: String,
}

/// A bounded read: the bytes plus whether the request was clamped to the
/// available length.
#[derive(Debug, Clone)]
pub struct ReadSlice {
    pub bytes: Vec<u8>,
    pub clamped: bool,
}
