//! Directory tree
//!
//! The engine's directory/file tree: an arena of directory nodes plus a
//! current-directory cursor and its display path stack. All operations are
//! relative to the cursor unless noted, validate before they mutate, and
//! return structured results.

use log::debug;

use crate::error::FsError;
use crate::fs::content::FileNode;
use crate::fs::node::{DirId, DirNode};
use crate::fs::results::{ChdirOutcome, DirListing, EntryKind, MapEntry};

/// Reserved name of the root directory.
pub const ROOT_NAME: &str = "root";

/// The in-memory filesystem.
///
/// The path stack duplicates what the parent links already encode; the two
/// are updated in lock-step and must never disagree.
#[derive(Debug)]
pub struct DirectoryTree {
    nodes: Vec<DirNode>,
    current: DirId,
    path: Vec<String>,
}

impl Default for DirectoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryTree {
    /// An empty tree: just the root, with the cursor on it.
    pub fn new() -> Self {
        Self {
            nodes: vec![DirNode::new(ROOT_NAME, None)],
            current: DirId(0),
            path: Vec::new(),
        }
    }

    pub(crate) fn root_id(&self) -> DirId {
        DirId(0)
    }

    pub(crate) fn node(&self, id: DirId) -> &DirNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: DirId) -> &mut DirNode {
        &mut self.nodes[id.0]
    }

    fn current_node(&self) -> &DirNode {
        self.node(self.current)
    }

    fn current_node_mut(&mut self) -> &mut DirNode {
        let id = self.current;
        self.node_mut(id)
    }

    /// Name of the directory the cursor points at.
    pub fn current_dir_name(&self) -> &str {
        self.current_node().name()
    }

    /// Cursor path from the root, for display ("root" or "root/docs/notes").
    pub fn current_path(&self) -> String {
        if self.path.is_empty() {
            ROOT_NAME.to_string()
        } else {
            format!("{}/{}", ROOT_NAME, self.path.join("/"))
        }
    }

    /// The names below root on the cursor path, in order.
    pub fn path_stack(&self) -> &[String] {
        &self.path
    }

    /// Creates an empty file in the current directory.
    ///
    /// A subdirectory of the same name does not block this; files and
    /// subdirectories occupy separate namespaces.
    pub fn create_file(&mut self, name: &str) -> Result<(), FsError> {
        let dir = self.current_node_mut();
        if dir.files.contains_key(name) {
            return Err(FsError::FileAlreadyExists(name.to_string()));
        }
        dir.files.insert(name.to_string(), FileNode::new(name));
        debug!("created file '{}' in '{}'", name, self.current_path());
        Ok(())
    }

    /// Removes a file from the current directory.
    ///
    /// No check on open state: deleting an open file is allowed and silently
    /// drops the handle with the node.
    pub fn delete_file(&mut self, name: &str) -> Result<(), FsError> {
        match self.current_node_mut().files.remove(name) {
            Some(_) => {
                debug!("deleted file '{}' from '{}'", name, self.current_path());
                Ok(())
            }
            None => Err(FsError::FileNotFound(name.to_string())),
        }
    }

    /// Creates a subdirectory of the current directory.
    pub fn mkdir(&mut self, name: &str) -> Result<(), FsError> {
        if name.is_empty() {
            return Err(FsError::InvalidArgument(
                "directory name cannot be empty".to_string(),
            ));
        }
        if name == ROOT_NAME {
            return Err(FsError::InvalidArgument(format!(
                "'{}' is a reserved directory name",
                ROOT_NAME
            )));
        }
        if self.current_node().subdirs.contains_key(name) {
            return Err(FsError::DirectoryAlreadyExists(name.to_string()));
        }
        let parent = self.current;
        let id = DirId(self.nodes.len());
        self.nodes.push(DirNode::new(name, Some(parent)));
        self.node_mut(parent).subdirs.insert(name.to_string(), id);
        debug!("created directory '{}' in '{}'", name, self.current_path());
        Ok(())
    }

    /// Moves the cursor: `..` goes to the parent, anything else enters the
    /// named subdirectory. The path stack moves with the cursor.
    pub fn chdir(&mut self, name: &str) -> Result<ChdirOutcome, FsError> {
        if name == ".." {
            let parent = self.current_node().parent();
            return Ok(match parent {
                Some(parent) => {
                    self.current = parent;
                    self.path.pop();
                    ChdirOutcome::MovedUp
                }
                None => ChdirOutcome::AlreadyAtRoot,
            });
        }
        let target = self.current_node().subdirs.get(name).copied();
        match target {
            Some(id) => {
                self.current = id;
                self.path.push(name.to_string());
                Ok(ChdirOutcome::Entered)
            }
            None => Err(FsError::DirectoryNotFound(name.to_string())),
        }
    }

    /// Lists the current directory.
    pub fn list(&self) -> DirListing {
        let dir = self.current_node();
        DirListing {
            dir_name: dir.name().to_string(),
            subdirs: dir.subdirs.keys().cloned().collect(),
            files: dir.files.keys().cloned().collect(),
        }
    }

    /// Renames `source` to `target` within the current directory.
    ///
    /// An existing `target` is replaced without complaint; the AlreadyExists
    /// check of `create_file` deliberately does not apply here. Returns
    /// whether a file was replaced.
    pub fn move_file(&mut self, source: &str, target: &str) -> Result<bool, FsError> {
        let dir = self.current_node_mut();
        if !dir.files.contains_key(source) {
            return Err(FsError::FileNotFound(source.to_string()));
        }
        if source == target {
            return Ok(false);
        }
        let replaced = match dir.files.remove(source) {
            Some(mut file) => {
                file.set_name(target);
                dir.files.insert(target.to_string(), file).is_some()
            }
            None => false,
        };
        debug!(
            "moved file '{}' -> '{}' in '{}' (replaced: {})",
            source,
            target,
            self.current_path(),
            replaced
        );
        Ok(replaced)
    }

    /// Recursive preorder dump of the whole tree from the root, independent
    /// of the cursor. Subdirectories are visited before the files beside
    /// them; the root itself is not an entry.
    pub fn memory_map(&self) -> Vec<MapEntry> {
        let mut entries = Vec::new();
        self.walk(self.root_id(), 0, &mut entries);
        entries
    }

    fn walk(&self, id: DirId, depth: usize, out: &mut Vec<MapEntry>) {
        let dir = self.node(id);
        for (name, &sub) in &dir.subdirs {
            out.push(MapEntry {
                depth,
                kind: EntryKind::Directory,
                name: name.clone(),
            });
            self.walk(sub, depth + 1, out);
        }
        for name in dir.files.keys() {
            out.push(MapEntry {
                depth,
                kind: EntryKind::File,
                name: name.clone(),
            });
        }
    }

    /// Acquires the exclusive handle of a file in the current directory.
    pub fn open_file(&mut self, name: &str) -> Result<(), FsError> {
        self.file_mut(name)?.open()
    }

    /// Releases the handle of a file in the current directory.
    pub fn close_file(&mut self, name: &str) -> Result<(), FsError> {
        self.file_mut(name)?.close();
        Ok(())
    }

    /// Looks up a file in the current directory.
    pub fn file(&self, name: &str) -> Result<&FileNode, FsError> {
        self.current_node()
            .files
            .get(name)
            .ok_or_else(|| FsError::FileNotFound(name.to_string()))
    }

    /// Looks up a file in the current directory for mutation.
    pub fn file_mut(&mut self, name: &str) -> Result<&mut FileNode, FsError> {
        self.current_node_mut()
            .files
            .get_mut(name)
            .ok_or_else(|| FsError::FileNotFound(name.to_string()))
    }

    // Attach points for the codec: the image is trusted, so these skip the
    // cursor and the creation-time validation.

    pub(crate) fn attach_dir(&mut self, parent: DirId, name: &str) -> DirId {
        let id = DirId(self.nodes.len());
        self.nodes.push(DirNode::new(name, Some(parent)));
        self.node_mut(parent).subdirs.insert(name.to_string(), id);
        id
    }

    pub(crate) fn attach_file(&mut self, dir: DirId, name: &str, content: Vec<u8>) {
        self.node_mut(dir)
            .files
            .insert(name.to_string(), FileNode::with_content(name, content));
    }
}
