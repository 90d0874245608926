//! File content engine
//!
//! A file is a named, growable byte buffer with positional edit operations
//! and an open/closed exclusivity flag. Content is treated as text but no
//! encoding validation is performed. Every operation validates before it
//! mutates, so a failed call leaves the buffer untouched.

use log::warn;

use crate::error::FsError;
use crate::fs::results::{ReadSlice, TruncateOutcome};

/// A file node: content buffer plus handle state.
#[derive(Debug)]
pub struct FileNode {
    name: String,
    content: Vec<u8>,
    is_open: bool,
}

impl FileNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            content: Vec::new(),
            is_open: false,
        }
    }

    pub(crate) fn with_content(name: &str, content: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            content,
            is_open: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Whether the exclusive handle is currently held.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Acquires the file's exclusive handle.
    ///
    /// At most one handle exists per file; opening an already-open file
    /// fails and leaves the handle state unchanged.
    pub fn open(&mut self) -> Result<(), FsError> {
        if self.is_open {
            return Err(FsError::AlreadyOpen(self.name.clone()));
        }
        self.is_open = true;
        Ok(())
    }

    /// Releases the handle. Closing a closed file is a no-op.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Appends `text` at the end of the buffer.
    pub fn append(&mut self, text: &[u8]) {
        self.content.extend_from_slice(text);
    }

    /// Writes `text` at byte position `pos`.
    ///
    /// Positions inside the buffer overwrite in place, growing the buffer if
    /// the text runs past the end (overwrite-and-extend, not insert). A
    /// position past the end pads the gap with spaces before appending.
    pub fn write_at(&mut self, pos: i64, text: &[u8]) -> Result<(), FsError> {
        if pos < 0 {
            return Err(FsError::InvalidArgument(format!("negative position {}", pos)));
        }
        let pos = pos as usize;
        let len = self.content.len();
        if pos <= len {
            let overlap = text.len().min(len - pos);
            self.content[pos..pos + overlap].copy_from_slice(&text[..overlap]);
            self.content.extend_from_slice(&text[overlap..]);
        } else {
            self.content.resize(pos, b' ');
            self.content.extend_from_slice(text);
        }
        Ok(())
    }

    /// The entire buffer. Never fails.
    pub fn read_all(&self) -> &[u8] {
        &self.content
    }

    /// Reads `size` bytes starting at `start`.
    ///
    /// A start outside the buffer is an error; a size running past the end
    /// is clamped to what is available and reported as such.
    pub fn read_from(&self, start: i64, size: i64) -> Result<ReadSlice, FsError> {
        if size < 0 {
            return Err(FsError::InvalidArgument(format!("negative size {}", size)));
        }
        let len = self.content.len();
        if start < 0 || start as usize >= len {
            return Err(FsError::OutOfBounds(format!(
                "start {} outside content of length {}",
                start, len
            )));
        }
        let start = start as usize;
        let mut size = size as usize;
        let mut clamped = false;
        if size > len - start {
            warn!(
                "read on '{}' clamped: {} bytes requested at {}, {} available",
                self.name,
                size,
                start,
                len - start
            );
            size = len - start;
            clamped = true;
        }
        Ok(ReadSlice {
            bytes: self.content[start..start + size].to_vec(),
            clamped,
        })
    }

    /// Relocates the byte range `[start, start + size)` to `target`.
    ///
    /// The range is extracted, removed from the buffer, and re-inserted at
    /// index `target` of the now-shorter buffer, in that order. `target` is
    /// therefore bounded by the post-removal length, and a target past it is
    /// rejected rather than clamped.
    pub fn move_within(&mut self, start: i64, size: i64, target: i64) -> Result<(), FsError> {
        if size < 0 {
            return Err(FsError::InvalidArgument(format!("negative size {}", size)));
        }
        let len = self.content.len();
        if start < 0 || (start as usize).saturating_add(size as usize) > len {
            return Err(FsError::OutOfBounds(format!(
                "range of {} bytes at {} outside content of length {}",
                size, start, len
            )));
        }
        let remaining = len - size as usize;
        if target < 0 || target as usize > remaining {
            return Err(FsError::OutOfBounds(format!(
                "target {} outside post-removal content of length {}",
                target, remaining
            )));
        }
        let start = start as usize;
        let size = size as usize;
        let target = target as usize;
        let moved: Vec<u8> = self.content.drain(start..start + size).collect();
        self.content.splice(target..target, moved);
        Ok(())
    }

    /// Cuts the buffer down to `max_size` bytes.
    ///
    /// A size at or past the current length keeps the content as it is; that
    /// is not an error.
    pub fn truncate(&mut self, max_size: i64) -> Result<TruncateOutcome, FsError> {
        if max_size < 0 {
            return Err(FsError::InvalidArgument(format!("negative size {}", max_size)));
        }
        let max = max_size as usize;
        if max >= self.content.len() {
            warn!(
                "truncate on '{}' to {} is at or past current length {}, nothing cut",
                self.name,
                max,
                self.content.len()
            );
            return Ok(TruncateOutcome::KeptAsIs);
        }
        self.content.truncate(max);
        Ok(TruncateOutcome::Truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(content: &str) -> FileNode {
        let mut file = FileNode::new("test.txt");
        file.append(content.as_bytes());
        file
    }

    #[test]
    fn test_append_and_read_all() {
        let mut file = FileNode::new("a.txt");
        assert!(file.is_empty());
        file.append(b"hello");
        file.append(b" world");
        assert_eq!(file.read_all(), b"hello world");
        assert_eq!(file.len(), 11);
    }

    #[test]
    fn test_write_at_overwrites_in_place() {
        let mut file = file_with("abcdef");
        file.write_at(2, b"XY").unwrap();
        assert_eq!(file.read_all(), b"abXYef");
    }

    #[test]
    fn test_write_at_overwrite_and_extend() {
        let mut file = file_with("abc");
        file.write_at(2, b"XYZ").unwrap();
        assert_eq!(file.read_all(), b"abXYZ");
    }

    #[test]
    fn test_write_at_end_appends() {
        let mut file = file_with("abc");
        file.write_at(3, b"d").unwrap();
        assert_eq!(file.read_all(), b"abcd");
    }

    #[test]
    fn test_write_at_past_end_pads_with_spaces() {
        let mut file = file_with("ab");
        file.write_at(5, b"cd").unwrap();
        assert_eq!(file.read_all(), b"ab   cd");
        // Exactly pos - len spaces, final length pos + text length.
        assert_eq!(file.len(), 5 + 2);
    }

    #[test]
    fn test_write_at_past_end_of_empty_file() {
        let mut file = FileNode::new("a.txt");
        file.write_at(3, b"x").unwrap();
        assert_eq!(file.read_all(), b"   x");
    }

    #[test]
    fn test_write_at_negative_position_rejected() {
        let mut file = file_with("abc");
        let err = file.write_at(-1, b"x").unwrap_err();
        assert!(matches!(err, FsError::InvalidArgument(_)));
        assert_eq!(file.read_all(), b"abc");
    }

    #[test]
    fn test_read_from_within_bounds() {
        let file = file_with("hello world");
        let slice = file.read_from(6, 5).unwrap();
        assert_eq!(slice.bytes, b"world");
        assert!(!slice.clamped);
    }

    #[test]
    fn test_read_from_clamps_oversized_request() {
        let file = file_with("hello world");
        let slice = file.read_from(6, 50).unwrap();
        assert_eq!(slice.bytes, b"world");
        assert!(slice.clamped);
    }

    #[test]
    fn test_read_from_start_out_of_bounds() {
        let file = file_with("hello");
        assert!(matches!(
            file.read_from(5, 1),
            Err(FsError::OutOfBounds(_))
        ));
        assert!(matches!(
            file.read_from(-1, 1),
            Err(FsError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_read_from_negative_size() {
        let file = file_with("hello");
        assert!(matches!(
            file.read_from(0, -2),
            Err(FsError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_move_within_forward() {
        let mut file = file_with("abcdef");
        // Extract "bc", leaving "adef"; insert at index 3 of the shorter buffer.
        file.move_within(1, 2, 3).unwrap();
        assert_eq!(file.read_all(), b"adebcf");
        assert_eq!(file.len(), 6);
    }

    #[test]
    fn test_move_within_to_front() {
        let mut file = file_with("abcdef");
        file.move_within(1, 2, 0).unwrap();
        assert_eq!(file.read_all(), b"bcadef");
    }

    #[test]
    fn test_move_within_target_boundary() {
        // target == len - size is the last valid slot...
        let mut file = file_with("abcdef");
        file.move_within(0, 2, 4).unwrap();
        assert_eq!(file.read_all(), b"cdefab");

        // ...and one past it is rejected, buffer untouched.
        let mut file = file_with("abcdef");
        assert!(matches!(
            file.move_within(0, 2, 5),
            Err(FsError::OutOfBounds(_))
        ));
        assert_eq!(file.read_all(), b"abcdef");
    }

    #[test]
    fn test_move_within_range_out_of_bounds() {
        let mut file = file_with("abcdef");
        assert!(matches!(
            file.move_within(4, 3, 0),
            Err(FsError::OutOfBounds(_))
        ));
        assert!(matches!(
            file.move_within(-1, 2, 0),
            Err(FsError::OutOfBounds(_))
        ));
        assert!(matches!(
            file.move_within(0, 2, -1),
            Err(FsError::OutOfBounds(_))
        ));
        assert!(matches!(
            file.move_within(0, -2, 0),
            Err(FsError::InvalidArgument(_))
        ));
        assert_eq!(file.read_all(), b"abcdef");
    }

    #[test]
    fn test_truncate_cuts_content() {
        let mut file = file_with("abcdef");
        assert_eq!(file.truncate(3).unwrap(), TruncateOutcome::Truncated);
        assert_eq!(file.read_all(), b"abc");
    }

    #[test]
    fn test_truncate_to_zero() {
        let mut file = file_with("abc");
        assert_eq!(file.truncate(0).unwrap(), TruncateOutcome::Truncated);
        assert!(file.is_empty());
    }

    #[test]
    fn test_truncate_at_or_past_length_is_noop() {
        let mut file = file_with("abcdef");
        assert_eq!(file.truncate(6).unwrap(), TruncateOutcome::KeptAsIs);
        assert_eq!(file.truncate(10).unwrap(), TruncateOutcome::KeptAsIs);
        assert_eq!(file.read_all(), b"abcdef");
    }

    #[test]
    fn test_truncate_negative_rejected() {
        let mut file = file_with("abcdef");
        assert!(matches!(
            file.truncate(-1),
            Err(FsError::InvalidArgument(_))
        ));
        assert_eq!(file.read_all(), b"abcdef");
    }

    #[test]
    fn test_open_close_state_machine() {
        let mut file = FileNode::new("a.txt");
        assert!(!file.is_open());
        file.open().unwrap();
        assert!(file.is_open());

        // Second open fails and leaves the handle held.
        assert!(matches!(file.open(), Err(FsError::AlreadyOpen(_))));
        assert!(file.is_open());

        file.close();
        assert!(!file.is_open());
        // Closing again is a no-op.
        file.close();
        assert!(!file.is_open());
        file.open().unwrap();
        assert!(file.is_open());
    }
}
