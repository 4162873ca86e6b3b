//! DX100 32-voice bank (VMEM) SYSEX framing.

use std::path::Path;

use anyhow::Context;
use log::{debug, warn};
use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::{Result, SyxError};
use crate::voice::{decode_voice, Voice};

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;
const YAMAHA_ID: u8 = 0x43;
const FORMAT_32_VOICES: u8 = 0x04; // 0x03 is a single voice (VCED)
const BYTE_COUNT_MS: u8 = 0x20;
const BYTE_COUNT_LS: u8 = 0x00;

/// Number of voices in a bank
pub const BANK_VOICES: usize = 32;

/// Size of one packed voice block
pub const VOICE_BLOCK_SIZE: usize = 128;

/// Header bytes before the first voice block
pub const HEADER_SIZE: usize = 6;

/// Voice payload (32 voices * 128 bytes)
pub const PAYLOAD_SIZE: usize = BANK_VOICES * VOICE_BLOCK_SIZE;

/// Full bank dump: header + payload + checksum + EOX
pub const BULK_FULL_SYSEX_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE + 2;

/// A bank of 32 voices in on-disk slot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bank {
    voices: Vec<Voice>,
}

impl Bank {
    /// Decodes a bank from raw SYSEX bytes.
    pub fn new(data: &[u8]) -> Result<Bank> {
        BankDecoder::new(data).run()
    }

    /// Reads and decodes a bank dump from disk.
    ///
    /// Files shorter than a full dump are rejected before decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Bank> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read SYSEX file '{}'", path.display()))?;

        check_file_size(data.len())
            .with_context(|| format!("'{}' is not a 32 voice bank", path.display()))?;

        Bank::new(&data).with_context(|| format!("failed to decode '{}'", path.display()))
    }

    /// All voices, slot 0 first.
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Voice at `slot`, if in range.
    pub fn get(&self, slot: usize) -> Option<&Voice> {
        self.voices.get(slot)
    }

    /// Iterates voices in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Voice> {
        self.voices.iter()
    }

    /// Number of voices, always [`BANK_VOICES`].
    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Always false for a decoded bank.
    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }
}

impl<'a> IntoIterator for &'a Bank {
    type Item = &'a Voice;
    type IntoIter = std::slice::Iter<'a, Voice>;

    fn into_iter(self) -> Self::IntoIter {
        self.voices.iter()
    }
}

/// Decodes a bank from raw SYSEX bytes.
pub fn decode_bank(data: &[u8]) -> Result<Bank> {
    Bank::new(data)
}

/// Rejects inputs too short to hold a full bank.
pub fn check_file_size(len: usize) -> Result<()> {
    if len < BULK_FULL_SYSEX_SIZE {
        return Err(SyxError::FileTooShort {
            len,
            expected: BULK_FULL_SYSEX_SIZE,
        });
    }
    Ok(())
}

/// Where a [`BankDecoder`] is in the framing sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeState {
    /// Nothing read yet
    Start,
    /// Header accepted
    HeaderChecked,
    /// All 32 voice blocks decoded
    VoicesDecoded,
    /// Footer accepted
    FooterChecked,
    /// Bank complete
    Done,
    /// Stopped at the first violation
    Failed(SyxError),
}

/// Decoder for one bank dump. Owns its cursor and the voices decoded so far.
#[derive(Debug)]
pub struct BankDecoder<'a> {
    cursor: ByteCursor<'a>,
    state: DecodeState,
    voices: Vec<Voice>,
    checksum: Option<u8>,
}

impl<'a> BankDecoder<'a> {
    /// Creates a decoder over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            state: DecodeState::Start,
            voices: Vec::with_capacity(BANK_VOICES),
            checksum: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DecodeState {
        &self.state
    }

    /// Voices decoded so far.
    pub fn decoded_voices(&self) -> usize {
        self.voices.len()
    }

    /// Checksum byte as read from the footer. It is never validated.
    pub fn checksum(&self) -> Option<u8> {
        self.checksum
    }

    /// Runs header, voice and footer decoding, failing fast.
    ///
    /// Once finished, further calls return the same bank or the same error.
    pub fn run(&mut self) -> Result<Bank> {
        loop {
            let step = match self.state {
                DecodeState::Start => self.check_header(),
                DecodeState::HeaderChecked => self.decode_voices(),
                DecodeState::VoicesDecoded => self.check_footer(),
                DecodeState::FooterChecked => Ok(DecodeState::Done),
                DecodeState::Done => {
                    return Ok(Bank {
                        voices: self.voices.clone(),
                    })
                }
                DecodeState::Failed(ref err) => return Err(err.clone()),
            };

            match step {
                Ok(next) => self.state = next,
                Err(err) => {
                    debug!("SYSEX: bank decode failed in {:?}: {}", self.state, err);
                    self.state = DecodeState::Failed(err.clone());
                    return Err(err);
                }
            }
        }
    }

    fn check_header(&mut self) -> Result<DecodeState> {
        if self.cursor.len() > BULK_FULL_SYSEX_SIZE {
            warn!(
                "SYSEX: input is {} bytes, larger than the expected {}; trailing bytes ignored",
                self.cursor.len(),
                BULK_FULL_SYSEX_SIZE
            );
        }

        let [status, id, channel, format, count_ms, count_ls] =
            self.cursor.read_array::<HEADER_SIZE>()?;

        if status != SYSEX_START {
            return Err(SyxError::BadStatusByte(status));
        }
        if id != YAMAHA_ID {
            return Err(SyxError::BadVendorId(id));
        }
        if format != FORMAT_32_VOICES {
            return Err(SyxError::BadFormatNumber(format));
        }
        // Only rejected when both bytes are off; a dump with one wrong count
        // byte has always been accepted.
        if count_ms != BYTE_COUNT_MS && count_ls != BYTE_COUNT_LS {
            return Err(SyxError::BadByteCount {
                ms: count_ms,
                ls: count_ls,
            });
        }

        debug!("SYSEX: header ok, channel byte 0x{:02X}", channel);
        Ok(DecodeState::HeaderChecked)
    }

    fn decode_voices(&mut self) -> Result<DecodeState> {
        for slot in 0..BANK_VOICES {
            let block_start = self.cursor.position();
            let voice = decode_voice(&mut self.cursor)?;
            debug!(
                "SYSEX: voice {:2} '{}' algorithm {} ({} of {} bytes used)",
                slot,
                voice.name,
                voice.algorithm,
                self.cursor.position() - block_start,
                VOICE_BLOCK_SIZE
            );
            self.voices.push(voice);
            // always a full block, whatever the voice consumed
            self.cursor.seek(block_start + VOICE_BLOCK_SIZE);
        }
        Ok(DecodeState::VoicesDecoded)
    }

    fn check_footer(&mut self) -> Result<DecodeState> {
        let checksum = self.cursor.read_byte()?;
        self.checksum = Some(checksum);
        let eox = self.cursor.read_byte()?;

        if eox != SYSEX_END {
            return Err(SyxError::BadEoxByte(eox));
        }

        debug!("SYSEX: footer ok, checksum 0x{:02X} (unchecked)", checksum);
        Ok(DecodeState::FooterChecked)
    }
}
