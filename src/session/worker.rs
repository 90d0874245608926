//! Worker sessions
//!
//! Each worker owns one command stream: it reads `input_worker<id>.txt` line
//! by line, executes every command against the shared tree through the gate,
//! and writes the responses to `output_worker<id>.txt`. Commands from one
//! worker run in stream order; interleaving across workers is whatever the
//! gate yields.

use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::codec;
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::protocol::{CommandStatus, handle_command, parse_command};
use crate::sync::CommandGate;

/// Runs one worker's command stream to completion.
///
/// A missing input stream is not an error; the worker just has nothing to
/// do. Response rendering happens after the gate is released, so the
/// critical section covers exactly one command's execution.
pub async fn run_worker(
    id: usize,
    gate: CommandGate,
    config: Arc<ShellConfig>,
) -> Result<(), ShellError> {
    let input_path = config.input_path(id);
    let output_path = config.output_path(id);

    let input = match File::open(&input_path).await {
        Ok(file) => file,
        Err(e) => {
            warn!(
                "worker {}: no command stream at {}: {}",
                id,
                input_path.display(),
                e
            );
            return Ok(());
        }
    };
    let mut output = File::create(&output_path).await?;
    let mut reader = BufReader::new(input);
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await?;
        if n == 0 {
            info!("worker {}: end of command stream", id);
            break;
        }

        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.len() > config.max_command_length {
            warn!(
                "worker {}: command exceeds {} bytes, skipped",
                id, config.max_command_length
            );
            output
                .write_all(format!("Worker {}: Command too long\n", id).as_bytes())
                .await?;
            continue;
        }

        let command = parse_command(trimmed);
        info!("worker {}: {:?}", id, command);

        let result = gate.with(|tree| handle_command(tree, &command)).await;

        if let CommandStatus::Failure(reason) = &result.status {
            debug!("worker {}: command failed: {}", id, reason);
        }

        let response = result
            .message
            .unwrap_or_else(|| format!("Command executed: {}", trimmed));
        output
            .write_all(format!("Worker {}: {}\n", id, response).as_bytes())
            .await?;

        if result.status == CommandStatus::CloseStream {
            save_image(&gate, &config.image_file()).await;
            info!("worker {}: exit requested, stream closed", id);
            break;
        }
    }

    output.flush().await?;
    Ok(())
}

/// Saves the image under the gate; failures are logged, never fatal.
pub async fn save_image(gate: &CommandGate, path: &Path) {
    let result = gate.with(|tree| codec::save_to_path(tree, path)).await;
    if let Err(e) = result {
        error!("failed to save file system image: {}", e);
    }
}
