//! Sequential reader over a SYSEX byte buffer.

use crate::error::{Result, SyxError};

/// Cursor over an immutable byte slice.
///
/// Only reads are bounds checked; `seek` accepts any position so a decoder
/// can jump to the next fixed-size block even if that lands past the end.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the next byte and advances by one.
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(SyxError::OutOfBounds {
            offset: self.pos,
            len: self.data.len(),
        })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads `N` consecutive bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        for b in out.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(out)
    }

    /// Moves to an absolute offset.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left before the end of the buffer (zero once past it).
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}
