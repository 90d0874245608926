//! Help listings
//!
//! Static command reference shown by `help` and `help <command>`.

/// Command reference table: name, usage, description.
pub const HELP_ENTRIES: &[(&str, &str, &str)] = &[
    ("create", "create <filename>", "Create a new file in the current directory"),
    ("delete", "delete <filename>", "Delete a file from the current directory"),
    ("mkdir", "mkdir <dirname>", "Create a new directory"),
    ("chdir", "chdir <dirname>", "Change to the named directory (use '..' to go up)"),
    ("ls", "ls", "List files and directories in the current directory"),
    ("move", "move <source> <target>", "Rename a file, replacing any existing target"),
    ("open", "open <filename>", "Acquire the file's exclusive handle"),
    ("close", "close <filename>", "Release the file's handle"),
    ("write", "write <filename> <text>", "Append text at the end of the file"),
    ("write_at", "write_at <filename> <pos> <text>", "Write text at a specific position"),
    ("read", "read <filename>", "Print the whole file content"),
    ("read_from", "read_from <filename> <start> <size>", "Print part of the file"),
    ("move_within", "move_within <filename> <start> <size> <target>", "Relocate data inside the file"),
    ("truncate", "truncate <filename> <size>", "Cut the file to the given length"),
    ("memory_map", "memory_map", "Show the whole directory tree"),
    ("help", "help [command]", "Show this list or one command"),
    ("exit", "exit", "Save the file system and end this stream"),
];

/// Renders the full numbered command listing.
pub fn render_help() -> String {
    let mut out = String::from("Available commands:");
    for (i, (_, usage, description)) in HELP_ENTRIES.iter().enumerate() {
        out.push_str(&format!("\n{:02}. {:<46} - {}", i + 1, usage, description));
    }
    out
}

/// Renders the reference line for one command, if it exists.
pub fn render_specific_help(command: &str) -> Option<String> {
    HELP_ENTRIES
        .iter()
        .find(|(name, _, _)| *name == command)
        .map(|(_, usage, description)| format!("{} - {}", usage, description))
}

/// The bare usage column for one command.
pub fn usage(command: &str) -> Option<&'static str> {
    HELP_ENTRIES
        .iter()
        .find(|(name, _, _)| *name == command)
        .map(|(_, usage, _)| *usage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_help_lists_every_command() {
        let help = render_help();
        for (name, _, _) in HELP_ENTRIES {
            assert!(help.contains(name), "help is missing '{}'", name);
        }
    }

    #[test]
    fn test_render_specific_help() {
        let line = render_specific_help("write_at").unwrap();
        assert!(line.starts_with("write_at <filename> <pos> <text>"));
        assert!(render_specific_help("bogus").is_none());
    }

    #[test]
    fn test_usage_lookup() {
        assert_eq!(usage("ls"), Some("ls"));
        assert_eq!(usage("move"), Some("move <source> <target>"));
        assert_eq!(usage("bogus"), None);
    }
}
