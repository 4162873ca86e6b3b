//! Sub-byte field extraction for the packed VMEM parameter bytes.

/// A contiguous run of bits inside one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    /// Bits belonging to the field, in place.
    pub mask: u8,
    /// Right shift that moves the field down to bit 0.
    pub shift: u8,
}

impl BitField {
    /// Creates a field from its in-place mask and shift.
    pub const fn new(mask: u8, shift: u8) -> Self {
        Self { mask, shift }
    }

    /// Pulls the field out of `byte`.
    #[inline]
    pub const fn extract(self, byte: u8) -> u8 {
        extract(byte, self.mask, self.shift)
    }

    /// Moves `value` into the field's position, dropping bits that don't fit.
    #[inline]
    pub const fn place(self, value: u8) -> u8 {
        (value << self.shift) & self.mask
    }

    /// Largest value the field can hold.
    pub const fn max(self) -> u8 {
        self.mask >> self.shift
    }
}

/// Masked-and-shifted value of `byte`.
#[inline]
pub const fn extract(byte: u8, mask: u8, shift: u8) -> u8 {
    (byte & mask) >> shift
}

/// Bit layout of every packed byte in a VMEM voice block.
pub mod layout {
    use super::BitField;

    // operator: AME / EBS / KVS
    /// Amplitude modulation enable (bit 6)
    pub const AMP_MOD_ENABLE: BitField = BitField::new(0x40, 6);
    /// EG bias sensitivity (bits 5-3)
    pub const EG_BIAS_SENSITIVITY: BitField = BitField::new(0x38, 3);
    /// Key velocity sensitivity (bits 2-0)
    pub const KEY_VELOCITY_SENSITIVITY: BitField = BitField::new(0x07, 0);

    // operator: RS / DBT
    /// Rate scaling (bits 4-3)
    pub const RATE_SCALING: BitField = BitField::new(0x18, 3);
    /// Detune (bits 2-0)
    pub const DETUNE: BitField = BitField::new(0x07, 0);

    // voice: SY / FBL / ALG
    /// LFO key sync (bit 6)
    pub const LFO_SYNC: BitField = BitField::new(0x40, 6);
    /// Feedback level (bits 5-3)
    pub const FEEDBACK: BitField = BitField::new(0x38, 3);
    /// Algorithm (bits 2-0)
    pub const ALGORITHM: BitField = BitField::new(0x07, 0);

    // voice: PMS / AMS / LFW
    /// Pitch modulation sensitivity (bits 7-5)
    pub const PITCH_MOD_SENSITIVITY: BitField = BitField::new(0xE0, 5);
    /// Amplitude modulation sensitivity (bits 4-3)
    pub const AMP_MOD_SENSITIVITY: BitField = BitField::new(0x18, 3);
    /// LFO waveform (bits 1-0)
    pub const LFO_WAVE: BitField = BitField::new(0x03, 0);

    // voice: CH / MO / SU / PO / PM
    /// Chorus switch (bit 5)
    pub const CHORUS: BitField = BitField::new(0x20, 5);
    /// Mono/poly mode (bit 3)
    pub const MONO: BitField = BitField::new(0x08, 3);
    /// Sustain foot switch (bit 2)
    pub const SUSTAIN: BitField = BitField::new(0x04, 2);
    /// Portamento foot switch (bit 1)
    pub const PORTAMENTO_ENABLE: BitField = BitField::new(0x02, 1);
    /// Portamento mode (bit 0)
    pub const PORTAMENTO_MODE: BitField = BitField::new(0x01, 0);
}
