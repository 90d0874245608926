//! Command handlers
//!
//! Dispatches parsed commands to the engine and renders the outcome as
//! response text. This is the only layer that turns engine results into
//! user-facing output; the engine itself stays silent.

use log::info;

use crate::fs::results::{ChdirOutcome, EntryKind, TruncateOutcome};
use crate::fs::tree::DirectoryTree;
use crate::protocol::commands::{Command, CommandResult, CommandStatus};
use crate::protocol::help;
use crate::protocol::suggest;

/// Dispatches a parsed command to its handler.
pub fn handle_command(tree: &mut DirectoryTree, command: &Command) -> CommandResult {
    match command {
        Command::Create(name) => handle_cmd_create(tree, name),
        Command::Delete(name) => handle_cmd_delete(tree, name),
        Command::Mkdir(name) => handle_cmd_mkdir(tree, name),
        Command::Chdir(name) => handle_cmd_chdir(tree, name),
        Command::Ls => handle_cmd_ls(tree),
        Command::Move { source, target } => handle_cmd_move(tree, source, target),
        Command::Open(name) => handle_cmd_open(tree, name),
        Command::Close(name) => handle_cmd_close(tree, name),
        Command::Write { name, text } => handle_cmd_write(tree, name, text),
        Command::WriteAt { name, pos, text } => handle_cmd_write_at(tree, name, *pos, text),
        Command::Read(name) => handle_cmd_read(tree, name),
        Command::ReadFrom { name, start, size } => handle_cmd_read_from(tree, name, *start, *size),
        Command::MoveWithin {
            name,
            start,
            size,
            target,
        } => handle_cmd_move_within(tree, name, *start, *size, *target),
        Command::Truncate { name, size } => handle_cmd_truncate(tree, name, *size),
        Command::MemoryMap => handle_cmd_memory_map(tree),
        Command::Help(topic) => handle_cmd_help(topic.as_deref()),
        Command::Exit => handle_cmd_exit(),
        Command::Unknown(raw) => handle_cmd_unknown(raw),
    }
}

fn success(message: impl Into<String>) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(message.into()),
    }
}

fn failure(error: impl std::fmt::Display) -> CommandResult {
    let text = error.to_string();
    CommandResult {
        status: CommandStatus::Failure(text.clone()),
        message: Some(text),
    }
}

fn handle_cmd_create(tree: &mut DirectoryTree, name: &str) -> CommandResult {
    match tree.create_file(name) {
        Ok(()) => success(format!("File created: {}", name)),
        Err(e) => failure(e),
    }
}

fn handle_cmd_delete(tree: &mut DirectoryTree, name: &str) -> CommandResult {
    match tree.delete_file(name) {
        Ok(()) => success(format!("File deleted: {}", name)),
        Err(e) => failure(e),
    }
}

fn handle_cmd_mkdir(tree: &mut DirectoryTree, name: &str) -> CommandResult {
    match tree.mkdir(name) {
        Ok(()) => success(format!("Directory created: {}", name)),
        Err(e) => failure(e),
    }
}

fn handle_cmd_chdir(tree: &mut DirectoryTree, name: &str) -> CommandResult {
    match tree.chdir(name) {
        Ok(ChdirOutcome::Entered) | Ok(ChdirOutcome::MovedUp) => {
            success(format!("Current directory: {}", tree.current_path()))
        }
        Ok(ChdirOutcome::AlreadyAtRoot) => success("Already at root directory."),
        Err(e) => failure(e),
    }
}

fn handle_cmd_ls(tree: &DirectoryTree) -> CommandResult {
    let listing = tree.list();
    if listing.is_empty() {
        return success("Directory is empty.");
    }
    let mut out = format!("Contents of directory '{}':", listing.dir_name);
    for dir in &listing.subdirs {
        out.push_str(&format!("\n[DIR] {}", dir));
    }
    for file in &listing.files {
        out.push_str(&format!("\n[FILE] {}", file));
    }
    success(out)
}

fn handle_cmd_move(tree: &mut DirectoryTree, source: &str, target: &str) -> CommandResult {
    match tree.move_file(source, target) {
        Ok(replaced) => {
            if replaced {
                info!("move replaced existing file '{}'", target);
            }
            success(format!("Moved file: {} -> {}", source, target))
        }
        Err(e) => failure(e),
    }
}

fn handle_cmd_open(tree: &mut DirectoryTree, name: &str) -> CommandResult {
    match tree.open_file(name) {
        Ok(()) => success(format!("File opened: {}", name)),
        Err(e) => failure(e),
    }
}

fn handle_cmd_close(tree: &mut DirectoryTree, name: &str) -> CommandResult {
    match tree.close_file(name) {
        Ok(()) => success(format!("File closed: {}", name)),
        Err(e) => failure(e),
    }
}

fn handle_cmd_write(tree: &mut DirectoryTree, name: &str, text: &str) -> CommandResult {
    match tree.file_mut(name) {
        Ok(file) => {
            file.append(text.as_bytes());
            success(format!("Wrote {} bytes to '{}'", text.len(), name))
        }
        Err(e) => failure(e),
    }
}

fn handle_cmd_write_at(tree: &mut DirectoryTree, name: &str, pos: i64, text: &str) -> CommandResult {
    let file = match tree.file_mut(name) {
        Ok(file) => file,
        Err(e) => return failure(e),
    };
    match file.write_at(pos, text.as_bytes()) {
        Ok(()) => success(format!("Wrote {} bytes at {} in '{}'", text.len(), pos, name)),
        Err(e) => failure(e),
    }
}

fn handle_cmd_read(tree: &DirectoryTree, name: &str) -> CommandResult {
    match tree.file(name) {
        Ok(file) => success(String::from_utf8_lossy(file.read_all()).into_owned()),
        Err(e) => failure(e),
    }
}

fn handle_cmd_read_from(tree: &DirectoryTree, name: &str, start: i64, size: i64) -> CommandResult {
    let file = match tree.file(name) {
        Ok(file) => file,
        Err(e) => return failure(e),
    };
    match file.read_from(start, size) {
        Ok(slice) => success(String::from_utf8_lossy(&slice.bytes).into_owned()),
        Err(e) => failure(e),
    }
}

fn handle_cmd_move_within(
    tree: &mut DirectoryTree,
    name: &str,
    start: i64,
    size: i64,
    target: i64,
) -> CommandResult {
    let file = match tree.file_mut(name) {
        Ok(file) => file,
        Err(e) => return failure(e),
    };
    match file.move_within(start, size, target) {
        Ok(()) => success(format!(
            "Moved {} bytes from {} to {} in '{}'",
            size, start, target, name
        )),
        Err(e) => failure(e),
    }
}

fn handle_cmd_truncate(tree: &mut DirectoryTree, name: &str, size: i64) -> CommandResult {
    let file = match tree.file_mut(name) {
        Ok(file) => file,
        Err(e) => return failure(e),
    };
    match file.truncate(size) {
        Ok(TruncateOutcome::Truncated) => success(format!("Truncated '{}' to {} bytes", name, size)),
        Ok(TruncateOutcome::KeptAsIs) => {
            success(format!("File '{}' is already within {} bytes", name, size))
        }
        Err(e) => failure(e),
    }
}

fn handle_cmd_memory_map(tree: &DirectoryTree) -> CommandResult {
    let entries = tree.memory_map();
    if entries.is_empty() {
        return success("File system is empty.");
    }
    let mut out = String::from("Memory map:");
    for entry in &entries {
        out.push('\n');
        for _ in 0..entry.depth {
            out.push_str("  ");
        }
        out.push_str(match entry.kind {
            EntryKind::Directory => "[DIR] ",
            EntryKind::File => "[FILE] ",
        });
        out.push_str(&entry.name);
    }
    success(out)
}

fn handle_cmd_help(topic: Option<&str>) -> CommandResult {
    match topic {
        None => success(help::render_help()),
        Some(command) => match help::render_specific_help(command) {
            Some(line) => success(line),
            None => failure(format!(
                "Unknown command '{}'. Use 'help' to see the list of available commands.",
                command
            )),
        },
    }
}

fn handle_cmd_exit() -> CommandResult {
    CommandResult {
        status: CommandStatus::CloseStream,
        message: Some("Saving file system and exiting...".to_string()),
    }
}

/// Unknown or malformed input: point at the usage line when the command word
/// itself is known, otherwise suggest the nearest command.
fn handle_cmd_unknown(raw: &str) -> CommandResult {
    let word = raw.split_whitespace().next().unwrap_or("");
    if let Some(usage) = help::usage(&word.to_ascii_lowercase()) {
        return failure(format!("Invalid arguments for '{}'. Usage: {}", word, usage));
    }
    match suggest::suggest(word) {
        Some(candidate) => failure(format!(
            "Unknown command '{}'. Did you mean '{}'?",
            word, candidate
        )),
        None => failure(format!(
            "Unknown command '{}'. No similar command found.",
            word
        )),
    }
}
