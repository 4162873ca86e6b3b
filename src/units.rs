//! Conversions from raw VMEM values to engineering units

use log::warn;

use crate::error::{Result, SyxError};

/// Number of entries in the frequency ratio table
pub const NUM_RATIOS: usize = 64;

/// Operator frequency ratio lookup table, indexed by `Operator::frequency_ratio_index`
///
/// Entries 46/47 are out of ascending order in the hardware table and are
/// kept that way.
pub const RATIOS: [f32; NUM_RATIOS] = [
    0.5, 0.71, 0.78, 0.87, 1.0, 1.41, 1.57, 1.73, 2.0, 2.82, 3.0,
    3.14, 3.46, 4.0, 4.24, 4.71, 5.0, 5.19, 5.65, 6.0, 6.28, 6.92,
    7.0, 7.07, 7.85, 8.0, 8.48, 8.65, 9.0, 9.42, 9.89, 10.0, 10.38,
    10.99, 11.0, 11.30, 12.0, 12.11, 12.56, 12.72, 13.0, 13.84, 14.0, 14.1,
    14.13, 15.0, 15.55, 15.37, 15.70, 16.96, 17.27, 17.30, 18.37, 18.84, 19.03,
    19.78, 20.41, 20.76, 21.20, 21.98, 22.49, 23.53, 24.22, 25.95,
];

/// Largest raw attack/decay1 rate
pub const MAX_RATE: u8 = 31;
/// Largest raw release rate and decay1 level
pub const MAX_LEVEL: u8 = 15;
/// Largest raw detune value
pub const MAX_DETUNE: u8 = 6;
/// Largest raw feedback value
pub const MAX_FEEDBACK: u8 = 7;

/// Longest envelope segment produced by the rate conversions
pub const MAX_SEGMENT_MS: f64 = 1000.0;
/// Detune span either side of zero
pub const DETUNE_SPAN_CENTS: f64 = 2.6;
/// Upper end of the feedback display range
pub const FEEDBACK_DISPLAY_MAX: f64 = 99.0;

/// Looks up the frequency ratio for `index`
pub fn ratio(index: u8) -> Result<f32> {
    RATIOS
        .get(index as usize)
        .copied()
        .ok_or(SyxError::RatioIndexOutOfRange(index))
}

/// Linearly maps `value` from `[old_min, old_max]` onto `[new_min, new_max]`.
///
/// Values outside the source range extrapolate. A zero-width source range is
/// an error rather than a division by zero.
pub fn scale(value: f64, old_min: f64, old_max: f64, new_min: f64, new_max: f64) -> Result<f64> {
    if old_max == old_min {
        warn!("SYSEX: refusing to rescale {} from zero-width range at {}", value, old_min);
        return Err(SyxError::DegenerateScaleRange { bound: old_min });
    }
    Ok(new_min + (value - old_min) * (new_max - new_min) / (old_max - old_min))
}

/// Rate values are inverted: higher raw rate means a shorter segment.
fn inverted(max: u8, raw: u8) -> f64 {
    f64::from(max) - f64::from(raw)
}

/// Attack time in milliseconds
pub fn attack_ms(attack_rate: u8) -> Result<f64> {
    scale(inverted(MAX_RATE, attack_rate), 0.0, MAX_RATE.into(), 0.0, MAX_SEGMENT_MS)
}

/// First decay time in milliseconds
pub fn decay_ms(decay1_rate: u8) -> Result<f64> {
    scale(inverted(MAX_RATE, decay1_rate), 0.0, MAX_RATE.into(), 0.0, MAX_SEGMENT_MS)
}

/// Release time in milliseconds
pub fn release_ms(release_rate: u8) -> Result<f64> {
    scale(inverted(MAX_LEVEL, release_rate), 0.0, MAX_LEVEL.into(), 0.0, MAX_SEGMENT_MS)
}

/// Sustain level (0-1) reached at the end of the first decay
pub fn sustain_level(decay1_level: u8) -> Result<f64> {
    scale(inverted(MAX_LEVEL, decay1_level), 0.0, MAX_LEVEL.into(), 0.0, 1.0)
}

/// Detune in cents, centered on raw value 3
pub fn detune_cents(detune: u8) -> Result<f64> {
    scale(
        detune.into(),
        0.0,
        MAX_DETUNE.into(),
        -DETUNE_SPAN_CENTS,
        DETUNE_SPAN_CENTS,
    )
}

/// Feedback on a 0-99 display scale
pub fn feedback_display(feedback: u8) -> Result<f64> {
    scale(feedback.into(), 0.0, MAX_FEEDBACK.into(), 0.0, FEEDBACK_DISPLAY_MAX)
}
