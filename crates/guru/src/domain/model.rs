//! Domain models for window selections and buffer snapshots.

use std::io;

use crate::domain::errors::GuruError;
use crate::domain::offset::byte_offset;

/// Selection as Acme reports it: rune indexes into the window body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    q0: usize,
    q1: usize,
}

impl SelectionRange {
    pub fn new(q0: usize, q1: usize) -> Result<Self, GuruError> {
        if q0 > q1 {
            return Err(GuruError::address(
                "reading dot",
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("selection start {q0} is past its end {q1}"),
                ),
            ));
        }
        Ok(Self { q0, q1 })
    }

    pub fn q0(&self) -> usize {
        self.q0
    }

    pub fn q1(&self) -> usize {
        self.q1
    }

    /// Convert both endpoints to byte offsets into `body`.
    ///
    /// Each endpoint gets its own scan from the start of the body.
    pub fn to_bytes(self, body: &[u8]) -> Result<(usize, usize), GuruError> {
        let start = byte_offset(self.q0, body)?;
        let end = byte_offset(self.q1, body)?;
        Ok((start, end))
    }
}

/// The file name, contents, and byte-addressed selection of one window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferSnapshot {
    name: String,
    body: Vec<u8>,
    start: usize,
    end: usize,
}

impl BufferSnapshot {
    /// Build a snapshot from a rune selection, converting it against `body`.
    pub fn from_runes(
        name: String,
        body: Vec<u8>,
        selection: SelectionRange,
    ) -> Result<Self, GuruError> {
        let (start, end) = selection.to_bytes(&body)?;
        Ok(Self {
            name,
            body,
            start,
            end,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Byte offsets of the selection, `start <= end <= body.len()`.
    pub fn byte_range(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}
