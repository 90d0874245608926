//! Concurrency gate
//!
//! One mutual-exclusion region guards the whole tree: a command acquires the
//! gate, runs to completion against the tree, and releases. The closure API
//! is synchronous, so nothing can suspend inside the critical section.
//! Swapping the policy later (say, per-node locking) only means replacing
//! this wrapper; engine logic never sees it.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::fs::tree::DirectoryTree;

/// Shared, serialized access to the directory tree.
///
/// Cloning hands out another handle to the same tree; ordering across
/// handles is whatever lock acquisition yields.
#[derive(Clone)]
pub struct CommandGate {
    tree: Arc<Mutex<DirectoryTree>>,
}

impl CommandGate {
    pub fn new(tree: DirectoryTree) -> Self {
        Self {
            tree: Arc::new(Mutex::new(tree)),
        }
    }

    /// Runs `op` with exclusive access to the tree.
    pub async fn with<R>(&self, op: impl FnOnce(&mut DirectoryTree) -> R) -> R {
        let mut guard = self.tree.lock().await;
        op(&mut guard)
    }
}
