//! Error types
//!
//! Defines domain-specific error types for each module of the shell.

use std::fmt;
use std::io;

/// Filesystem engine errors
#[derive(Debug)]
pub enum FsError {
    FileNotFound(String),
    DirectoryNotFound(String),
    FileAlreadyExists(String),
    DirectoryAlreadyExists(String),
    AlreadyOpen(String),
    OutOfBounds(String),
    InvalidArgument(String),
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::FileNotFound(n) => write!(f, "File not found: {}", n),
            FsError::DirectoryNotFound(n) => write!(f, "Directory not found: {}", n),
            FsError::FileAlreadyExists(n) => write!(f, "File already exists: {}", n),
            FsError::DirectoryAlreadyExists(n) => write!(f, "Directory already exists: {}", n),
            FsError::AlreadyOpen(n) => write!(f, "File is already open: {}", n),
            FsError::OutOfBounds(msg) => write!(f, "Out of bounds: {}", msg),
            FsError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for FsError {}

/// Persistence codec errors
#[derive(Debug)]
pub enum CodecError {
    Io(io::Error),
    Malformed(String),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Io(e) => write!(f, "I/O error: {}", e),
            CodecError::Malformed(msg) => write!(f, "Malformed image: {}", msg),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<io::Error> for CodecError {
    fn from(error: io::Error) -> Self {
        CodecError::Io(error)
    }
}

/// General shell error that encompasses all error types
#[derive(Debug)]
pub enum ShellError {
    Fs(FsError),
    Codec(CodecError),
    Io(io::Error),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Fs(e) => write!(f, "File system error: {}", e),
            ShellError::Codec(e) => write!(f, "Codec error: {}", e),
            ShellError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {}

impl From<FsError> for ShellError {
    fn from(error: FsError) -> Self {
        ShellError::Fs(error)
    }
}

impl From<CodecError> for ShellError {
    fn from(error: CodecError) -> Self {
        ShellError::Codec(error)
    }
}

impl From<io::Error> for ShellError {
    fn from(error: io::Error) -> Self {
        ShellError::Io(error)
    }
}
