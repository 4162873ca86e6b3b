use dx100syx::bank::{BANK_VOICES, BULK_FULL_SYSEX_SIZE};
use dx100syx::error::Record;
use dx100syx::{decode_bank, BankDecoder, DecodeState, SyxError};

mod common;
use common::{block_offset, synthetic_bank};

#[test]
fn decodes_32_voices_in_slot_order() {
    let bank = decode_bank(&synthetic_bank()).unwrap();

    assert_eq!(bank.len(), BANK_VOICES);
    for (slot, voice) in bank.iter().enumerate() {
        assert_eq!(voice.operators.len(), 4);
        assert_eq!(voice.name, format!("voice_{:02}__", slot));
        assert_eq!(voice.algorithm as usize, slot % 8);
        assert_eq!(voice.feedback as usize, slot % 8);
    }
}

#[test]
fn names_are_sanitized() {
    let mut data = synthetic_bank();
    let name = block_offset(7) + 57;
    data[name..name + 10].copy_from_slice(&[b'A', b'b', 0x00, b' ', 0x7F, 0xE9, b'-', b'9', b'_', b'Z']);

    let bank = decode_bank(&data).unwrap();
    assert_eq!(bank.voices()[7].name, "ab_____9_z");

    for voice in &bank {
        assert_eq!(voice.name.len(), 10);
        assert!(voice
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
}

#[test]
fn operator_and_global_fields() {
    let bank = decode_bank(&synthetic_bank()).unwrap();
    let voice = bank.get(5).unwrap();

    let op3 = &voice.operators[2];
    assert_eq!(op3.attack_rate, 29);
    assert_eq!(op3.decay1_rate, 22);
    assert_eq!(op3.release_rate, 13);
    assert_eq!(op3.decay1_level, 2);
    assert_eq!(op3.amp_mod_enable, 0);
    assert_eq!(op3.eg_bias_sensitivity, 2);
    assert_eq!(op3.key_velocity_sensitivity, 5);
    assert_eq!(op3.output_level, 92);
    assert_eq!(op3.frequency_ratio_index, 7);
    assert_eq!(op3.rate_scaling, 2);
    assert_eq!(op3.detune, 3);

    assert_eq!(voice.modulations.lfo_sync, 1);
    assert_eq!(voice.modulations.lfo_speed, 35);
    assert_eq!(voice.modulations.pitch_mod_sensitivity, 6);
    assert_eq!(voice.modulations.amp_mod_sensitivity, 2);
    assert_eq!(voice.modulations.lfo_wave, 2);
    assert_eq!(voice.transpose, 24);
    assert_eq!(voice.pitch_bend_range, 4);
    assert_eq!(
        (voice.chorus, voice.mono, voice.sustain, voice.portamento_enable, voice.portamento_mode),
        (1, 0, 1, 1, 0)
    );
    assert_eq!(voice.controllers.foot_control_volume, 40);
    assert_eq!(voice.controllers.mod_wheel_pitch, 50);
    assert_eq!(voice.controllers.breath_control_pitch_bias, 50);
    assert_eq!(voice.reserved, [99, 99, 99, 50, 50, 50]);
}

#[test]
fn ratio_index_4_is_unity() {
    let mut data = synthetic_bank();
    data[block_offset(0) + 8] = 4;

    let bank = decode_bank(&data).unwrap();
    assert_eq!(bank.voices()[0].operators[0].frequency_ratio(), Ok(1.0));
}

#[test]
fn ratio_index_out_of_range_aborts_bank() {
    let mut data = synthetic_bank();
    data[block_offset(12) + 10 + 8] = 64;

    assert_eq!(decode_bank(&data), Err(SyxError::RatioIndexOutOfRange(64)));
}

#[test]
fn unused_block_tail_is_skipped() {
    // the synthetic blocks carry 0xFF after byte 73; reaching any of it
    // as the start of a voice would fail the ratio check
    let data = synthetic_bank();
    assert_eq!(data[block_offset(0) + 73], 0xFF);
    assert!(decode_bank(&data).is_ok());
}

#[test]
fn bad_status_byte_decodes_nothing() {
    let mut data = synthetic_bank();
    data[0] = 0x00;

    let mut decoder = BankDecoder::new(&data);
    assert_eq!(decoder.run(), Err(SyxError::BadStatusByte(0x00)));
    assert_eq!(decoder.decoded_voices(), 0);
    assert_eq!(
        decoder.state(),
        &DecodeState::Failed(SyxError::BadStatusByte(0x00))
    );
}

#[test]
fn bad_vendor_id() {
    let mut data = synthetic_bank();
    data[1] = 0x41;
    assert_eq!(decode_bank(&data), Err(SyxError::BadVendorId(0x41)));
}

#[test]
fn byte_count_needs_both_bytes_wrong() {
    let mut data = synthetic_bank();
    data[4] = 0x10;
    assert!(decode_bank(&data).is_ok());

    data[4] = 0x20;
    data[5] = 0x01;
    assert!(decode_bank(&data).is_ok());

    data[4] = 0x10;
    assert_eq!(
        decode_bank(&data),
        Err(SyxError::BadByteCount { ms: 0x10, ls: 0x01 })
    );
}

#[test]
fn bad_eox_after_all_voices() {
    let mut data = synthetic_bank();
    data[BULK_FULL_SYSEX_SIZE - 1] = 0xF6;

    let mut decoder = BankDecoder::new(&data);
    assert_eq!(decoder.run(), Err(SyxError::BadEoxByte(0xF6)));
    assert_eq!(decoder.decoded_voices(), BANK_VOICES);
}

#[test]
fn checksum_is_not_validated() {
    let mut data = synthetic_bank();
    for checksum in [0x00, 0x5A, 0x7F] {
        data[BULK_FULL_SYSEX_SIZE - 2] = checksum;
        let mut decoder = BankDecoder::new(&data);
        assert!(decoder.run().is_ok());
        assert_eq!(decoder.checksum(), Some(checksum));
    }
}

#[test]
fn truncated_buffer_fails_mid_voice() {
    let data = synthetic_bank();
    let mut decoder = BankDecoder::new(&data[..4000]);

    // voice 31 starts at 3974; its third operator runs out at 4000
    assert_eq!(
        decoder.run(),
        Err(SyxError::TruncatedInput {
            record: Record::Operator,
            offset: 4000
        })
    );
    assert_eq!(decoder.decoded_voices(), 31);
}

#[test]
fn missing_footer_is_out_of_bounds() {
    let data = synthetic_bank();
    assert_eq!(
        decode_bank(&data[..BULK_FULL_SYSEX_SIZE - 1]),
        Err(SyxError::OutOfBounds {
            offset: BULK_FULL_SYSEX_SIZE - 1,
            len: BULK_FULL_SYSEX_SIZE - 1
        })
    );
}

#[test]
fn oversized_input_is_tolerated() {
    let mut data = synthetic_bank();
    data.extend_from_slice(&[0xF0, 0x00, 0x00]);

    let bank = decode_bank(&data).unwrap();
    assert_eq!(bank, decode_bank(&synthetic_bank()).unwrap());
}
