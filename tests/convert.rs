use std::f64::consts::TAU;

use midi2wav::prelude::*;
use pretty_assertions::assert_eq;

/// A format 1 file with the given track bodies
fn midi_file(ticks_per_beat: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&6u32.to_be_bytes());
    bytes.extend_from_slice(&1u16.to_be_bytes());
    bytes.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    bytes.extend_from_slice(&ticks_per_beat.to_be_bytes());

    for track in tracks {
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(track.len() as u32).to_be_bytes());
        bytes.extend_from_slice(track);
    }
    bytes
}

/// A4 at velocity 64 for 480 ticks
const A4_HALF_SECOND: [u8; 13] = [
    0x00, 0x90, 69, 64, //
    0x83, 0x60, 0x80, 69, 0, //
    0x00, 0xFF, 0x2F, 0x00,
];

fn render(midi: &[u8], config: &ConvertConfig) -> Wav {
    convert(midi, config)
        .unwrap()
        .into_wav()
        .expect("ticks per quarter note timing")
}

#[test]
fn single_note_end_to_end() {
    let midi = midi_file(480, &[&A4_HALF_SECOND]);
    let wav = render(&midi, &ConvertConfig::default());

    // 480 ticks at 500 000 µs per beat
    let rate = 44_100.;
    let samples = wav.samples();
    assert_eq!(samples.len(), 22_050);

    let amplitude = 0.5 * (128. / 65.);
    let angular = 440. * TAU / rate;
    let fade = rate * 0.001 + 1.;
    for i in [100usize, 1_000, 11_025, 20_000] {
        let t = i as f64;
        let expected = amplitude * (angular * t).sin() * fade / fade;
        assert!((samples[i] - expected).abs() < 1e-12, "sample {i}");
    }
    assert_eq!(samples[0], 0.);
    assert!(samples.iter().all(|s| s.abs() <= amplitude + 1e-12));

    let bytes = wav.to_bytes();
    assert_eq!(bytes.len(), 44 + 44_100);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[4..8], &(44_100u32 + 36).to_le_bytes());
    assert_eq!(&bytes[22..24], &1u16.to_le_bytes());
    assert_eq!(&bytes[24..28], &44_100u32.to_le_bytes());
    assert_eq!(&bytes[34..36], &16u16.to_le_bytes());
    assert_eq!(&bytes[40..44], &44_100u32.to_le_bytes());
}

#[test]
fn data_size_follows_bit_depth() {
    let midi = midi_file(480, &[&A4_HALF_SECOND]);

    for (bits, bytes_per_sample) in [(8, 1), (16, 2), (24, 3), (32, 4)] {
        let config = ConvertConfig::default()
            .with_sample_rate(8_000)
            .with_bits_per_sample(bits);
        let wav = render(&midi, &config);

        let header = wav.header();
        assert_eq!(header.channels(), 1);
        assert_eq!(header.sample_rate(), 8_000);
        assert_eq!(header.data_size(), 4_000 * bytes_per_sample);
        assert_eq!(header.block_align() as u32, bytes_per_sample);
        assert_eq!(wav.to_bytes().len(), 44 + 4_000 * bytes_per_sample as usize);
    }
}

#[test]
fn tempo_comes_from_the_first_track() {
    #[rustfmt::skip]
    let tempo: &[u8] = &[
        0x00, 0xFF, 0x51, 0x03, 0x03, 0xD0, 0x90, // 250 000 µs per beat
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let midi = midi_file(480, &[tempo, &A4_HALF_SECOND]);
    let wav = render(&midi, &ConvertConfig::default().with_sample_rate(8_000));

    assert_eq!(wav.samples().len(), 2_000);
}

#[test]
fn skip_rules_drop_matching_tracks() {
    #[rustfmt::skip]
    let drums: &[u8] = &[
        0x00, 0xFF, 0x03, 0x05, b'D', b'r', b'u', b'm', b's',
        0x00, 0x99, 36, 127,
        0x87, 0x40, 0x89, 36, 0, // 960 ticks
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let midi = midi_file(480, &[drums, &A4_HALF_SECOND]);

    let all = render(&midi, &ConvertConfig::default().with_sample_rate(8_000));
    assert_eq!(all.samples().len(), 8_000);

    let config = ConvertConfig::default()
        .with_sample_rate(8_000)
        .skip_rules([SkipRule::new().with("trackName", "Drums")]);
    let without_drums = render(&midi, &config);
    assert_eq!(without_drums.samples().len(), 4_000);

    let config = ConvertConfig::default()
        .with_sample_rate(8_000)
        .skip_rules([SkipRule::new().with("trackName", "Bass")]);
    assert_eq!(render(&midi, &config), all);
}

#[test]
fn predicate_can_drop_every_track() {
    let midi = midi_file(480, &[&A4_HALF_SECOND, &A4_HALF_SECOND]);
    let config = ConvertConfig::default().with_skip(Skip::predicate(|_| true));

    let wav = render(&midi, &config);
    assert!(wav.samples().is_empty());
    assert_eq!(wav.to_bytes().len(), 44);
}

#[test]
fn loudest_instant_is_normalized() {
    #[rustfmt::skip]
    let chord: &[u8] = &[
        0x00, 0x90, 60, 127,
        0x00, 64, 127,
        0x00, 67, 127,
        0x83, 0x60, 60, 0,
        0x00, 64, 0,
        0x00, 67, 0,
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let midi = midi_file(480, &[chord]);
    let wav = render(&midi, &ConvertConfig::default().with_sample_rate(8_000));

    // 128 / (1 + 3 * 127)
    let per_note = 127. / 128. * (128. / 382.);
    assert!(wav.samples().iter().all(|s| s.abs() <= 3. * per_note + 1e-12));
    assert!(wav.samples().iter().any(|s| s.abs() > per_note));
}

#[test]
fn relative_duration_leaves_a_gap() {
    let midi = midi_file(480, &[&A4_HALF_SECOND]);
    let config = ConvertConfig::default()
        .with_sample_rate(8_000)
        .with_duration(0.5);
    let wav = render(&midi, &config);

    assert_eq!(wav.samples().len(), 4_000);
    assert!(wav.samples()[..2_000].iter().any(|&s| s != 0.));
    assert!(wav.samples()[2_000..].iter().all(|&s| s == 0.));
}

#[test]
fn foreign_chunks_are_ignored() {
    let mut midi = midi_file(480, &[&A4_HALF_SECOND]);
    // declare two chunks and put an unknown one first
    midi[11] = 2;
    let foreign = [b'X', b'F', b'I', b'R', 0, 0, 0, 3, 1, 2, 3];
    let tracks = midi.split_off(14);
    midi.extend_from_slice(&foreign);
    midi.extend(tracks);

    let wav = render(&midi, &ConvertConfig::default().with_sample_rate(8_000));
    assert_eq!(wav.samples().len(), 4_000);
}

#[test]
fn malformed_header_is_fatal() {
    let mut midi = midi_file(480, &[&A4_HALF_SECOND]);
    midi[0..4].copy_from_slice(b"RIFF");

    let err = match convert(&midi, &ConvertConfig::default()).unwrap_err() {
        ConvertError::Read(err) => err,
        other => panic!("expected a read error, got {other:?}"),
    };
    assert_eq!(err.position(), 0);
    assert_eq!(
        err.error_kind(),
        &ReaderErrorKind::ParseError(ParseError::Header(HeaderError::InvalidId(*b"RIFF")))
    );
}

#[test]
fn truncated_event_is_out_of_bounds() {
    // the note off is missing its velocity
    let midi = midi_file(480, &[&A4_HALF_SECOND[..8]]);

    let err = match convert(&midi, &ConvertConfig::default()).unwrap_err() {
        ConvertError::Read(err) => err,
        other => panic!("expected a read error, got {other:?}"),
    };
    assert!(err.is_out_of_bounds());
    // 14 header bytes, 8 chunk preamble bytes, 8 bytes into the body
    assert_eq!(err.position(), 30);
}

#[test]
fn missing_track_chunk_is_out_of_bounds() {
    let mut midi = midi_file(480, &[&A4_HALF_SECOND]);
    midi[11] = 2;

    let err = convert(&midi, &ConvertConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Read(ref e) if e.is_out_of_bounds()));
}

#[test]
fn audio_too_long_for_a_wav_file_is_rejected() {
    #[rustfmt::skip]
    let endless: &[u8] = &[
        0x00, 0xFF, 0x51, 0x03, 0xFF, 0xFF, 0xFF, // slowest tempo
        0x00, 0x90, 69, 64,
        0xFF, 0xFF, 0xFF, 0x7F, 0x80, 69, 0, // largest delta
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let midi = midi_file(1, &[endless]);

    let err = convert(&midi, &ConvertConfig::default().with_sample_rate(8_000)).unwrap_err();
    match err {
        ConvertError::OutputTooLarge(bytes) => assert!(bytes > u32::MAX as u64),
        other => panic!("expected the output to be too large, got {other:?}"),
    }
}

#[test]
fn invalid_settings_are_rejected() {
    let midi = midi_file(480, &[&A4_HALF_SECOND]);

    let config = ConvertConfig::default().with_bits_per_sample(12);
    assert_eq!(
        convert(&midi, &config).unwrap_err(),
        ConvertError::UnsupportedBitDepth(12)
    );

    let config = ConvertConfig::default().with_sample_rate(0);
    assert_eq!(
        convert(&midi, &config).unwrap_err(),
        ConvertError::InvalidSampleRate(0)
    );
}
