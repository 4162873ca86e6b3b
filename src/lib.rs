//! Decoder for Yamaha DX100/DX21/DX27 32-voice bank (VMEM) SYSEX dumps.
//!
//! A bank dump is a 6 byte header, 32 packed 128 byte voice blocks, a
//! checksum and an EOX byte. Each voice is decoded into four operators plus
//! global parameters, and can be rendered as a diagnostic dump or as a
//! parameter string for an external FM synth.

#![warn(missing_docs)]

pub mod bank;
pub mod bits;
pub mod cursor;
pub mod error;
pub mod render;
pub mod units;
pub mod voice;

pub use bank::{decode_bank, Bank, BankDecoder, DecodeState};
pub use cursor::ByteCursor;
pub use error::{Result, SyxError};
pub use voice::{decode_operator, decode_voice, Operator, Voice};
