//! memshell - Entry Point
//!
//! An in-memory file system behind a line-oriented command shell: concurrent
//! workers execute command streams against one shared directory tree, which
//! is loaded from a flat text image at startup and saved back at shutdown.

use log::{error, info};

use memshell::config::ShellConfig;
use memshell::shell::Shell;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ShellConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            panic!("memshell startup failed: {}", e);
        }
    };

    info!("launching memshell with {} worker streams", config.workers);

    let shell = Shell::new(config);
    shell.run().await;
}
