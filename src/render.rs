//! Text renderings of decoded voices.

use crate::error::Result;
use crate::units;
use crate::voice::{Operator, Voice};

/// Multi-line diagnostic dump of every raw and derived field of `voice`.
pub fn dump_voice(voice: &Voice) -> Result<String> {
    let mut ret = String::new();
    ret.push_str(&format!(
        "\nDX Voice: {} Algo:{} fb:{} pitchbend_range:{}\n",
        voice.name, voice.algorithm, voice.feedback, voice.pitch_bend_range
    ));

    for (i, op) in voice.operators.iter().enumerate() {
        ret.push_str(&format!("::OP{}::\n", i + 1));
        ret.push_str(&dump_operator(op)?);
    }

    let m = &voice.modulations;
    ret.push_str("::GLOBALS::\n");
    ret.push_str(&format!(
        "LFOSync:{} lfo_speed:{} lfo_delay:{} lfo_wave:{}\n",
        m.lfo_sync, m.lfo_speed, m.lfo_delay, m.lfo_wave
    ));
    ret.push_str(&format!(
        "transpose:{} chorus:{} sustain:{} porta_en:{} porta_mode:{} porta:{}\n",
        voice.transpose,
        voice.chorus,
        voice.sustain,
        voice.portamento_enable,
        voice.portamento_mode,
        voice.portamento_time
    ));
    ret.push_str(&format!(
        "pitch_mod_depth:{} amp_mod_depth:{} pitch_mod_sensitivity:{} amp_mod_sensitivity:{} mono:{} feedback_display:{}\n",
        m.pitch_mod_depth,
        m.amp_mod_depth,
        m.pitch_mod_sensitivity,
        m.amp_mod_sensitivity,
        voice.mono,
        format_number(units::feedback_display(voice.feedback)?)
    ));

    let c = &voice.controllers;
    ret.push_str("::CONTROLLERS::\n");
    ret.push_str(&format!(
        "foot_volume:{} mw_pitch:{} mw_ampli:{} bc_pitch:{} bc_ampli:{} bc_p_bias:{} bc_e_bias:{}\n",
        c.foot_control_volume,
        c.mod_wheel_pitch,
        c.mod_wheel_amplitude,
        c.breath_control_pitch,
        c.breath_control_amplitude,
        c.breath_control_pitch_bias,
        c.breath_control_eg_bias
    ));

    let reserved: Vec<String> = voice.reserved.iter().map(|b| b.to_string()).collect();
    ret.push_str(&format!("reserved:{}\n", reserved.join(" ")));

    Ok(ret)
}

fn dump_operator(op: &Operator) -> Result<String> {
    let mut ret = String::new();
    ret.push_str(&format!(
        "attack_rate:{} decay1_rate:{} decay2_rate:{} release_rate:{} decay1_level:{}\n",
        op.attack_rate, op.decay1_rate, op.decay2_rate, op.release_rate, op.decay1_level
    ));
    ret.push_str(&format!(
        "level_scaling:{} amp_mod_en:{} eg_bias_sensitivity:{} key_velocity_sensitivity:{}\n",
        op.level_scaling, op.amp_mod_enable, op.eg_bias_sensitivity, op.key_velocity_sensitivity
    ));
    ret.push_str(&format!(
        "out:{} ratio:{} rate_scaling:{} detune:{}\n",
        op.output_level, op.frequency_ratio_index, op.rate_scaling, op.detune
    ));
    ret.push_str(&format!(
        "freq_ratio:{} detune_cents:{} attack_ms:{} decay_ms:{} release_ms:{} sustain_lvl:{}\n",
        format_number(op.frequency_ratio()?.into()),
        format_number(units::detune_cents(op.detune)?),
        format_number(units::attack_ms(op.attack_rate)?),
        format_number(units::decay_ms(op.decay1_rate)?),
        format_number(units::release_ms(op.release_rate)?),
        format_number(units::sustain_level(op.decay1_level)?)
    ));
    Ok(ret)
}

/// Single-line `::key=value` parameter string for the external synth config.
///
/// Key names and order are consumed downstream and must not change.
pub fn param_string(voice: &Voice) -> Result<String> {
    let mut ret = format!(
        "::name={}::m_voice_mode={}::m_op4_feedback={}",
        voice.name,
        voice.algorithm,
        format_number(units::feedback_display(voice.feedback)?)
    );

    for (i, op) in voice.operators.iter().enumerate() {
        ret.push_str(&operator_params(op, i + 1)?);
    }

    Ok(ret)
}

fn operator_params(op: &Operator, num: usize) -> Result<String> {
    Ok(format!(
        "::m_op{num}_output_lvl={}::m_op{num}_ratio={}::m_op{num}_detune_cents={}\
         ::m_eg{num}_attack_ms={}::m_eg{num}_decay_ms={}::m_eg{num}_release_ms={}\
         ::m_eg{num}_sustain_lvl={}",
        op.output_level,
        format_number(op.frequency_ratio()?.into()),
        format_number(units::detune_cents(op.detune)?),
        format_number(units::attack_ms(op.attack_rate)?),
        format_number(units::decay_ms(op.decay1_rate)?),
        format_number(units::release_ms(op.release_rate)?),
        format_number(units::sustain_level(op.decay1_level)?),
    ))
}

/// Formats like a default C++ ostream: 6 significant digits, trailing zeros
/// trimmed, exponent form below 1e-4 or from 1e6 up.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let sci = format!("{:.5e}", value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return value.to_string();
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..6).contains(&exp) {
        let decimals = (5 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, value))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
