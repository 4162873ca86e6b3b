//! DX100 voice and operator data structures, decoded from VMEM bank blocks.

use log::trace;
use serde::Serialize;

use crate::bits::layout;
use crate::cursor::ByteCursor;
use crate::error::{Record, Result, SyxError};
use crate::units::{self, NUM_RATIOS};

/// Number of operators per voice
pub const NUM_OPERATORS: usize = 4;

/// Length of a voice name
pub const NAME_LEN: usize = 10;

/// Number of trailing bytes carried in each block but unused on the DX100
pub const NUM_RESERVED: usize = 6;

/// Bytes one operator record occupies
pub const OPERATOR_RECORD_SIZE: usize = 10;

/// One FM operator (oscillator + envelope)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Operator {
    /// Attack rate (0-31)
    pub attack_rate: u8,
    /// First decay rate (0-31)
    pub decay1_rate: u8,
    /// Second decay rate (0-31)
    pub decay2_rate: u8,
    /// Release rate (0-15)
    pub release_rate: u8,
    /// Level reached at the end of the first decay (0-15)
    pub decay1_level: u8,
    /// Keyboard level scaling (0-99)
    pub level_scaling: u8,
    /// Amplitude modulation enable (0/1)
    pub amp_mod_enable: u8,
    /// EG bias sensitivity (0-7)
    pub eg_bias_sensitivity: u8,
    /// Key velocity sensitivity (0-7)
    pub key_velocity_sensitivity: u8,
    /// Output level (0-99)
    pub output_level: u8,
    /// Index into [`units::RATIOS`]
    pub frequency_ratio_index: u8,
    /// Keyboard rate scaling (0-3)
    pub rate_scaling: u8,
    /// Detune (0-6, 3 is centered)
    pub detune: u8,
}

impl Operator {
    /// Frequency multiplier for this operator
    pub fn frequency_ratio(&self) -> Result<f32> {
        units::ratio(self.frequency_ratio_index)
    }
}

/// LFO and modulation parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModulationParameters {
    /// Restart the LFO on key on (0/1)
    pub lfo_sync: u8,
    /// LFO speed (0-99)
    pub lfo_speed: u8,
    /// LFO delay (0-99)
    pub lfo_delay: u8,
    /// Pitch modulation depth (0-99)
    pub pitch_mod_depth: u8,
    /// Amplitude modulation depth (0-99)
    pub amp_mod_depth: u8,
    /// Pitch modulation sensitivity (0-7)
    pub pitch_mod_sensitivity: u8,
    /// Amplitude modulation sensitivity (0-3)
    pub amp_mod_sensitivity: u8,
    /// LFO waveform: saw up, square, triangle, sample & hold (0-3)
    pub lfo_wave: u8,
}

/// Controller to parameter depths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Controllers {
    /// Foot control to volume
    pub foot_control_volume: u8,
    /// Mod wheel to pitch
    pub mod_wheel_pitch: u8,
    /// Mod wheel to amplitude
    pub mod_wheel_amplitude: u8,
    /// Breath control to pitch
    pub breath_control_pitch: u8,
    /// Breath control to amplitude
    pub breath_control_amplitude: u8,
    /// Breath control pitch bias
    pub breath_control_pitch_bias: u8,
    /// Breath control EG bias
    pub breath_control_eg_bias: u8,
}

/// One complete 4-operator patch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    /// Operators in stored order (op1..op4)
    pub operators: [Operator; NUM_OPERATORS],
    /// Operator 4 self feedback (0-7)
    pub feedback: u8,
    /// Algorithm (0-7)
    pub algorithm: u8,
    /// LFO/modulation parameters
    pub modulations: ModulationParameters,
    /// Transpose in semitones, 24 = C3 (0-48)
    pub transpose: u8,
    /// Pitch bend range in semitones (0-12)
    pub pitch_bend_range: u8,
    /// Chorus switch (0/1)
    pub chorus: u8,
    /// Mono mode (0/1)
    pub mono: u8,
    /// Sustain foot switch (0/1)
    pub sustain: u8,
    /// Portamento foot switch (0/1)
    pub portamento_enable: u8,
    /// Portamento mode: full time / fingered (0/1)
    pub portamento_mode: u8,
    /// Portamento time (0-99)
    pub portamento_time: u8,
    /// Controller depths
    pub controllers: Controllers,
    /// Sanitized name, always 10 characters from `[a-z0-9_]`
    pub name: String,
    /// Pitch EG bytes present in the format but unused on the DX100
    pub reserved: [u8; NUM_RESERVED],
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            operators: [Operator::default(); NUM_OPERATORS],
            feedback: 0,
            algorithm: 0,
            modulations: ModulationParameters::default(),
            transpose: 0,
            pitch_bend_range: 0,
            chorus: 0,
            mono: 0,
            sustain: 0,
            portamento_enable: 0,
            portamento_mode: 0,
            portamento_time: 0,
            controllers: Controllers::default(),
            name: "_".repeat(NAME_LEN),
            reserved: [0; NUM_RESERVED],
        }
    }
}

/// Maps one raw name byte onto `[a-z0-9_]`.
pub fn sanitize_name_byte(byte: u8) -> char {
    if byte.is_ascii_alphanumeric() {
        char::from(byte.to_ascii_lowercase())
    } else {
        '_'
    }
}

/// Sanitizes every byte of `raw` independently.
pub fn sanitize_name(raw: &[u8]) -> String {
    raw.iter().copied().map(sanitize_name_byte).collect()
}

/// Decodes one 10-byte operator record.
pub fn decode_operator(cursor: &mut ByteCursor) -> Result<Operator> {
    decode_operator_fields(cursor).map_err(|e| e.in_record(Record::Operator))
}

fn decode_operator_fields(cursor: &mut ByteCursor) -> Result<Operator> {
    let attack_rate = cursor.read_byte()?;
    let decay1_rate = cursor.read_byte()?;
    let decay2_rate = cursor.read_byte()?;
    let release_rate = cursor.read_byte()?;
    let decay1_level = cursor.read_byte()?;
    let level_scaling = cursor.read_byte()?;

    let ame_ebs_kvs = cursor.read_byte()?;
    let output_level = cursor.read_byte()?;

    let frequency_ratio_index = cursor.read_byte()?;
    if frequency_ratio_index as usize >= NUM_RATIOS {
        return Err(SyxError::RatioIndexOutOfRange(frequency_ratio_index));
    }

    let rs_dbt = cursor.read_byte()?;

    Ok(Operator {
        attack_rate,
        decay1_rate,
        decay2_rate,
        release_rate,
        decay1_level,
        level_scaling,
        amp_mod_enable: layout::AMP_MOD_ENABLE.extract(ame_ebs_kvs),
        eg_bias_sensitivity: layout::EG_BIAS_SENSITIVITY.extract(ame_ebs_kvs),
        key_velocity_sensitivity: layout::KEY_VELOCITY_SENSITIVITY.extract(ame_ebs_kvs),
        output_level,
        frequency_ratio_index,
        rate_scaling: layout::RATE_SCALING.extract(rs_dbt),
        detune: layout::DETUNE.extract(rs_dbt),
    })
}

/// Decodes one voice starting at the cursor.
///
/// Reads 73 bytes. The caller is responsible for moving on to the next
/// 128-byte block; this does not skip the unused tail.
pub fn decode_voice(cursor: &mut ByteCursor) -> Result<Voice> {
    let mut operators = [Operator::default(); NUM_OPERATORS];
    for (i, op) in operators.iter_mut().enumerate() {
        *op = decode_operator(cursor)?;
        trace!("SYSEX: op{} {:?}", i + 1, op);
    }

    decode_voice_globals(cursor, operators).map_err(|e| e.in_record(Record::Voice))
}

fn decode_voice_globals(
    cursor: &mut ByteCursor,
    operators: [Operator; NUM_OPERATORS],
) -> Result<Voice> {
    let sy_fbl_alg = cursor.read_byte()?;

    let lfo_speed = cursor.read_byte()?;
    let lfo_delay = cursor.read_byte()?;
    let pitch_mod_depth = cursor.read_byte()?;
    let amp_mod_depth = cursor.read_byte()?;

    let pms_ams_lfw = cursor.read_byte()?;

    let transpose = cursor.read_byte()?;
    let pitch_bend_range = cursor.read_byte()?;

    let ch_mo_su_po_pm = cursor.read_byte()?;

    let portamento_time = cursor.read_byte()?;

    let controllers = Controllers {
        foot_control_volume: cursor.read_byte()?,
        mod_wheel_pitch: cursor.read_byte()?,
        mod_wheel_amplitude: cursor.read_byte()?,
        breath_control_pitch: cursor.read_byte()?,
        breath_control_amplitude: cursor.read_byte()?,
        breath_control_pitch_bias: cursor.read_byte()?,
        breath_control_eg_bias: cursor.read_byte()?,
    };

    let name = sanitize_name(&cursor.read_array::<NAME_LEN>()?);
    let reserved = cursor.read_array::<NUM_RESERVED>()?;

    Ok(Voice {
        operators,
        feedback: layout::FEEDBACK.extract(sy_fbl_alg),
        algorithm: layout::ALGORITHM.extract(sy_fbl_alg),
        modulations: ModulationParameters {
            lfo_sync: layout::LFO_SYNC.extract(sy_fbl_alg),
            lfo_speed,
            lfo_delay,
            pitch_mod_depth,
            amp_mod_depth,
            pitch_mod_sensitivity: layout::PITCH_MOD_SENSITIVITY.extract(pms_ams_lfw),
            amp_mod_sensitivity: layout::AMP_MOD_SENSITIVITY.extract(pms_ams_lfw),
            lfo_wave: layout::LFO_WAVE.extract(pms_ams_lfw),
        },
        transpose,
        pitch_bend_range,
        chorus: layout::CHORUS.extract(ch_mo_su_po_pm),
        mono: layout::MONO.extract(ch_mo_su_po_pm),
        sustain: layout::SUSTAIN.extract(ch_mo_su_po_pm),
        portamento_enable: layout::PORTAMENTO_ENABLE.extract(ch_mo_su_po_pm),
        portamento_mode: layout::PORTAMENTO_MODE.extract(ch_mo_su_po_pm),
        portamento_time,
        controllers,
        name,
        reserved,
    })
}
