#![allow(dead_code)]

use dx100syx::bank::{BANK_VOICES, BULK_FULL_SYSEX_SIZE, HEADER_SIZE, VOICE_BLOCK_SIZE};
use dx100syx::bits::layout;

pub const BANK_HEADER: [u8; HEADER_SIZE] = [0xF0, 0x43, 0x00, 0x04, 0x20, 0x00];

/// Offset of a voice's first byte in a full dump.
pub fn block_offset(slot: usize) -> usize {
    HEADER_SIZE + slot * VOICE_BLOCK_SIZE
}

/// A 128 byte voice block with distinguishable values per slot.
///
/// Bytes past the 73 the decoder reads are filled with 0xFF, which would
/// decode as an out-of-range ratio index if a voice ever started there.
pub fn voice_block(slot: usize) -> [u8; VOICE_BLOCK_SIZE] {
    let mut block = [0xFFu8; VOICE_BLOCK_SIZE];
    let s = slot as u8;

    for op in 0..4 {
        let base = op * 10;
        let n = op as u8;
        block[base] = 31 - n; // attack rate
        block[base + 1] = 20 + n; // decay1 rate
        block[base + 2] = 10; // decay2 rate
        block[base + 3] = 15 - n; // release rate
        block[base + 4] = n; // decay1 level
        block[base + 5] = 50; // level scaling
        block[base + 6] = layout::AMP_MOD_ENABLE.place(n & 1)
            | layout::EG_BIAS_SENSITIVITY.place(n)
            | layout::KEY_VELOCITY_SENSITIVITY.place(7 - n);
        block[base + 7] = 90 + n; // output level
        block[base + 8] = (s + n) % 64; // ratio index
        block[base + 9] = layout::RATE_SCALING.place(n) | layout::DETUNE.place(3);
    }

    block[40] = layout::LFO_SYNC.place(1)
        | layout::FEEDBACK.place(s % 8)
        | layout::ALGORITHM.place(s % 8);
    block[41..45].copy_from_slice(&[35, 10, 5, 0]);
    block[45] = layout::PITCH_MOD_SENSITIVITY.place(6)
        | layout::AMP_MOD_SENSITIVITY.place(2)
        | layout::LFO_WAVE.place(2);
    block[46] = 24; // transpose
    block[47] = 4; // pitch bend range
    block[48] = layout::CHORUS.place(1) | layout::SUSTAIN.place(1) | layout::PORTAMENTO_ENABLE.place(1);
    block[49] = 0; // portamento time
    block[50..57].copy_from_slice(&[40, 50, 0, 0, 0, 50, 0]);

    let name = format!("Voice {:02}!!", slot);
    block[57..67].copy_from_slice(name.as_bytes());
    block[67..73].copy_from_slice(&[99, 99, 99, 50, 50, 50]);

    block
}

/// A well-formed 4104 byte bank built from [`voice_block`].
pub fn synthetic_bank() -> Vec<u8> {
    let mut data = Vec::with_capacity(BULK_FULL_SYSEX_SIZE);
    data.extend_from_slice(&BANK_HEADER);
    for slot in 0..BANK_VOICES {
        data.extend_from_slice(&voice_block(slot));
    }
    data.push(0x5A); // checksum, never validated
    data.push(0xF7);
    data
}
