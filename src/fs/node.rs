//! Node model
//!
//! Arena-backed directory nodes. A directory owns its subdirectories by id
//! and its files by value; the parent link is an id, never a reference, so
//! growing the arena cannot invalidate it. No operation removes a directory,
//! so arena slots are never freed and every `DirId` stays valid for the
//! lifetime of the tree.

use std::collections::BTreeMap;

use crate::fs::content::FileNode;

/// Stable handle to a directory node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirId(pub(crate) usize);

/// A single directory: named children in two separate namespaces.
///
/// File names are unique among files and subdirectory names among
/// subdirectories, but a file and a subdirectory may share a name.
#[derive(Debug)]
pub struct DirNode {
    pub(crate) name: String,
    pub(crate) parent: Option<DirId>,
    pub(crate) subdirs: BTreeMap<String, DirId>,
    pub(crate) files: BTreeMap<String, FileNode>,
}

impl DirNode {
    pub(crate) fn new(name: &str, parent: Option<DirId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            subdirs: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }

    /// Name of this directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent directory id; `None` only for the root.
    pub fn parent(&self) -> Option<DirId> {
        self.parent
    }

    /// True when the directory holds neither files nor subdirectories.
    pub fn is_empty(&self) -> bool {
        self.subdirs.is_empty() && self.files.is_empty()
    }
}
