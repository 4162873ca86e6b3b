//! Error types for SYSEX bank decoding.

use std::fmt;

use thiserror::Error;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, SyxError>;

/// The fixed-size record a truncated read was in the middle of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// One of the four per-voice operator records
    Operator,
    /// The global part of a voice block (everything after the operators)
    Voice,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Record::Operator => write!(f, "operator"),
            Record::Voice => write!(f, "voice"),
        }
    }
}

/// Errors that can occur while decoding a voice bank.
///
/// Every variant is fatal to the whole bank; nothing is recovered from a
/// partially valid dump.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyxError {
    /// A read ran past the end of the buffer.
    #[error("read past end of buffer at offset {offset} (buffer is {len} bytes)")]
    OutOfBounds {
        /// Offset of the byte that could not be read.
        offset: usize,
        /// Total buffer length.
        len: usize,
    },

    /// The buffer ended in the middle of a fixed-size record.
    #[error("{record} record truncated at offset {offset}")]
    TruncatedInput {
        /// Which record was being decoded.
        record: Record,
        /// Offset of the byte that could not be read.
        offset: usize,
    },

    /// First header byte is not the SYSEX start marker.
    #[error("header status 0x{0:02X} != 0xF0")]
    BadStatusByte(u8),

    /// Manufacturer id is not Yamaha.
    #[error("header id 0x{0:02X} != 0x43")]
    BadVendorId(u8),

    /// Format number is not the 32 voice bank format.
    #[error("header format 0x{0:02X} != 0x04")]
    BadFormatNumber(u8),

    /// Declared payload size is not 4096 bytes.
    #[error("header byte count 0x{ms:02X} 0x{ls:02X} is not 4k")]
    BadByteCount {
        /// Byte count, most significant byte.
        ms: u8,
        /// Byte count, least significant byte.
        ls: u8,
    },

    /// Last byte is not the SYSEX end marker.
    #[error("EOX 0x{0:02X} != 0xF7")]
    BadEoxByte(u8),

    /// `scale` was asked to map from a zero-width range.
    #[error("cannot rescale from a zero-width range at {bound}")]
    DegenerateScaleRange {
        /// The shared min/max of the source range.
        bound: f64,
    },

    /// A frequency ratio index has no entry in the ratio table.
    #[error("frequency ratio index {0} out of range (0-63)")]
    RatioIndexOutOfRange(u8),

    /// Input file is smaller than a full bank dump.
    #[error("file is {len} bytes, expected at least {expected}")]
    FileTooShort {
        /// Actual file length.
        len: usize,
        /// Minimum accepted length.
        expected: usize,
    },
}

impl SyxError {
    /// Re-tags a cursor overrun as a truncated record; other errors pass through.
    pub(crate) fn in_record(self, record: Record) -> Self {
        match self {
            SyxError::OutOfBounds { offset, .. } => SyxError::TruncatedInput { record, offset },
            other => other,
        }
    }
}
