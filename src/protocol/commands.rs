//! Command protocol
//!
//! Defines the shell command set, parsing of raw input lines, and the result
//! types handlers produce.

/// A parsed shell command.
///
/// Commands that take arguments carry them as owned values; `write` and
/// `write_at` keep the remainder of the line as their text payload.
#[derive(Debug, PartialEq)]
pub enum Command {
    Create(String),
    Delete(String),
    Mkdir(String),
    Chdir(String),
    Ls,
    Move { source: String, target: String },
    Open(String),
    Close(String),
    Write { name: String, text: String },
    WriteAt { name: String, pos: i64, text: String },
    Read(String),
    ReadFrom { name: String, start: i64, size: i64 },
    MoveWithin { name: String, start: i64, size: i64, target: i64 },
    Truncate { name: String, size: i64 },
    MemoryMap,
    Help(Option<String>),
    Exit,
    Unknown(String),
}

/// Outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    /// `exit`: save the image and end this worker's stream.
    CloseStream,
}

/// Full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Splits the next whitespace-delimited token off `input`, returning the
/// token and the remainder (still carrying its leading whitespace).
fn next_token(input: &str) -> (&str, &str) {
    let s = input.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    }
}

/// Rest-of-line text payload: the one space separating it from the previous
/// token is stripped, everything after that is kept verbatim.
fn payload(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}

fn unknown(line: &str) -> Command {
    Command::Unknown(line.trim().to_string())
}

/// Parses a raw input line into a `Command`.
///
/// Tokens are whitespace-delimited and the command word is
/// case-insensitive. A known command with missing or malformed arguments
/// parses to `Unknown` so the dispatcher can answer with usage help; extra
/// trailing tokens after a complete command are ignored.
pub fn parse_command(raw: &str) -> Command {
    let line = raw.trim_end_matches(['\r', '\n']);
    let (cmd_raw, rest) = next_token(line);
    let cmd = cmd_raw.to_ascii_lowercase();

    match cmd.as_str() {
        "ls" => Command::Ls,
        "memory_map" => Command::MemoryMap,
        "exit" => Command::Exit,
        "help" => {
            let (topic, _) = next_token(rest);
            Command::Help((!topic.is_empty()).then(|| topic.to_string()))
        }
        "create" => match name_arg(rest) {
            Some(name) => Command::Create(name),
            None => unknown(line),
        },
        "delete" => match name_arg(rest) {
            Some(name) => Command::Delete(name),
            None => unknown(line),
        },
        "mkdir" => match name_arg(rest) {
            Some(name) => Command::Mkdir(name),
            None => unknown(line),
        },
        "chdir" => match name_arg(rest) {
            Some(name) => Command::Chdir(name),
            None => unknown(line),
        },
        "open" => match name_arg(rest) {
            Some(name) => Command::Open(name),
            None => unknown(line),
        },
        "close" => match name_arg(rest) {
            Some(name) => Command::Close(name),
            None => unknown(line),
        },
        "read" => match name_arg(rest) {
            Some(name) => Command::Read(name),
            None => unknown(line),
        },
        "move" => {
            let (source, rest) = next_token(rest);
            let (target, _) = next_token(rest);
            if source.is_empty() || target.is_empty() {
                return unknown(line);
            }
            Command::Move {
                source: source.to_string(),
                target: target.to_string(),
            }
        }
        "write" => {
            let (name, rest) = next_token(rest);
            if name.is_empty() {
                return unknown(line);
            }
            Command::Write {
                name: name.to_string(),
                text: payload(rest).to_string(),
            }
        }
        "write_at" => {
            let (name, rest) = next_token(rest);
            let (pos, rest) = next_token(rest);
            match (name.is_empty(), pos.parse::<i64>()) {
                (false, Ok(pos)) => Command::WriteAt {
                    name: name.to_string(),
                    pos,
                    text: payload(rest).to_string(),
                },
                _ => unknown(line),
            }
        }
        "read_from" => {
            let (name, rest) = next_token(rest);
            let (start, rest) = next_token(rest);
            let (size, _) = next_token(rest);
            match (name.is_empty(), start.parse::<i64>(), size.parse::<i64>()) {
                (false, Ok(start), Ok(size)) => Command::ReadFrom {
                    name: name.to_string(),
                    start,
                    size,
                },
                _ => unknown(line),
            }
        }
        "move_within" => {
            let (name, rest) = next_token(rest);
            let (start, rest) = next_token(rest);
            let (size, rest) = next_token(rest);
            let (target, _) = next_token(rest);
            match (
                name.is_empty(),
                start.parse::<i64>(),
                size.parse::<i64>(),
                target.parse::<i64>(),
            ) {
                (false, Ok(start), Ok(size), Ok(target)) => Command::MoveWithin {
                    name: name.to_string(),
                    start,
                    size,
                    target,
                },
                _ => unknown(line),
            }
        }
        "truncate" => {
            let (name, rest) = next_token(rest);
            let (size, _) = next_token(rest);
            match (name.is_empty(), size.parse::<i64>()) {
                (false, Ok(size)) => Command::Truncate {
                    name: name.to_string(),
                    size,
                },
                _ => unknown(line),
            }
        }
        _ => unknown(line),
    }
}

fn name_arg(rest: &str) -> Option<String> {
    let (name, _) = next_token(rest);
    (!name.is_empty()).then(|| name.to_string())
}
