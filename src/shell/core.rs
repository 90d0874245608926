//! Shell core
//!
//! Owns the shared tree behind its gate, loads the image at startup, runs
//! every worker stream to completion, and saves the image at shutdown.

use log::{error, info};
use std::sync::Arc;

use crate::codec;
use crate::config::ShellConfig;
use crate::fs::tree::DirectoryTree;
use crate::session::{run_worker, save_image};
use crate::sync::CommandGate;

/// The shell: one shared tree, one gate, N worker streams.
pub struct Shell {
    config: Arc<ShellConfig>,
    gate: CommandGate,
}

impl Shell {
    /// Creates the shell, loading a prior image when one exists.
    ///
    /// A missing image starts the shell empty; an unreadable one is logged
    /// and also starts it empty rather than refusing to come up.
    pub fn new(config: ShellConfig) -> Self {
        let image = config.image_file();
        let tree = match codec::load_from_path(&image) {
            Ok(Some(tree)) => tree,
            Ok(None) => {
                info!(
                    "no image at {}, starting with an empty file system",
                    image.display()
                );
                DirectoryTree::new()
            }
            Err(e) => {
                error!("failed to load image from {}: {}", image.display(), e);
                DirectoryTree::new()
            }
        };

        Self {
            config: Arc::new(config),
            gate: CommandGate::new(tree),
        }
    }

    /// Runs every worker stream to completion, then saves the image.
    pub async fn run(&self) {
        info!("starting {} worker streams", self.config.workers);

        let mut handles = Vec::new();
        for id in 1..=self.config.workers {
            let gate = self.gate.clone();
            let config = Arc::clone(&self.config);

            // One task per worker so a slow stream never blocks the others.
            handles.push(tokio::spawn(async move {
                if let Err(e) = run_worker(id, gate, config).await {
                    error!("worker {} failed: {}", id, e);
                }
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!("worker task panicked: {}", e);
            }
        }

        save_image(&self.gate, &self.config.image_file()).await;
        info!("all workers completed, file system saved");
    }

    /// The gate, for embedding the shell in tests or other frontends.
    pub fn gate(&self) -> &CommandGate {
        &self.gate
    }
}
