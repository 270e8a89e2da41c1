//! Integration tests for the WAV write → inspect round-trip
//!
//! Exercises the on-disk artifact end to end: session filename
//! derivation, collision handling, header fidelity, payload order, and
//! the duration math the metrics report is built on.

use chrono::{Local, TimeZone};
use wavrec::audio::FrameBuffer;
use wavrec::config::AudioConfig;
use wavrec::wav;

fn mono_44100() -> AudioConfig {
    AudioConfig {
        device: "default".to_string(),
        sample_rate: 44100,
        channels: 1,
        chunk_size: 1024,
    }
}

fn session_start() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
}

fn ramp_frames(chunks: &[usize]) -> FrameBuffer {
    let mut frames = FrameBuffer::new();
    let mut value = 0i16;
    for &len in chunks {
        let chunk: Vec<i16> = (0..len)
            .map(|_| {
                value = value.wrapping_add(17);
                value
            })
            .collect();
        frames.push(chunk);
    }
    frames
}

#[test]
fn roundtrip_preserves_format_and_payload() {
    let dir = tempfile::tempdir().unwrap();
    let frames = ramp_frames(&[1024, 1024, 512]);
    let expected: Vec<i16> = frames.chunks().flatten().copied().collect();

    let path = wav::write_session(&frames, &mono_44100(), &session_start(), dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap(),
        "recording_20260806_120000.wav"
    );

    let metrics = wav::inspect(&path).unwrap();
    assert_eq!(metrics.channels, 1);
    assert_eq!(metrics.sample_rate, 44100);
    assert_eq!(metrics.bits_per_sample, 16);
    assert_eq!(metrics.frames as usize, expected.len());

    let reader = hound::WavReader::open(&path).unwrap();
    let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn duration_matches_sample_count() {
    let dir = tempfile::tempdir().unwrap();

    let one_second = ramp_frames(&[44100]);
    let path = wav::write_session(&one_second, &mono_44100(), &session_start(), dir.path()).unwrap();
    let metrics = wav::inspect(&path).unwrap();
    assert!((metrics.duration_secs() - 1.0).abs() < 1e-9);
    assert_eq!(metrics.duration_display(), "00:01.00");

    let half_second = ramp_frames(&[22050]);
    let path = wav::write_session(&half_second, &mono_44100(), &session_start(), dir.path()).unwrap();
    let metrics = wav::inspect(&path).unwrap();
    assert!((metrics.duration_secs() - 0.5).abs() < 1e-9);
}

#[test]
fn bit_rate_derives_from_header() {
    let dir = tempfile::tempdir().unwrap();
    let frames = ramp_frames(&[2048]);

    let path = wav::write_session(&frames, &mono_44100(), &session_start(), dir.path()).unwrap();
    let metrics = wav::inspect(&path).unwrap();

    // 44100 Hz x 16 bits x 1 channel
    assert_eq!(metrics.bit_rate(), 705_600);
    assert_eq!(metrics.precision_bits(), 16);
}

#[test]
fn same_second_sessions_get_distinct_files() {
    let dir = tempfile::tempdir().unwrap();
    let frames = ramp_frames(&[256]);
    let started = session_start();

    let first = wav::write_session(&frames, &mono_44100(), &started, dir.path()).unwrap();
    let second = wav::write_session(&frames, &mono_44100(), &started, dir.path()).unwrap();
    let third = wav::write_session(&frames, &mono_44100(), &started, dir.path()).unwrap();

    assert_eq!(first.file_name().unwrap(), "recording_20260806_120000.wav");
    assert_eq!(second.file_name().unwrap(), "recording_20260806_120000_2.wav");
    assert_eq!(third.file_name().unwrap(), "recording_20260806_120000_3.wav");
    assert!(first.exists() && second.exists() && third.exists());
}

#[test]
fn stereo_header_survives_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let config = AudioConfig {
        channels: 2,
        ..mono_44100()
    };
    // Interleaved L/R pairs; 2048 samples = 1024 frames
    let frames = ramp_frames(&[2048]);

    let path = wav::write_session(&frames, &config, &session_start(), dir.path()).unwrap();
    let metrics = wav::inspect(&path).unwrap();

    assert_eq!(metrics.channels, 2);
    assert_eq!(metrics.frames, 1024);
    assert_eq!(metrics.bit_rate(), 1_411_200);
}

#[test]
fn inspect_rejects_non_wav_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_audio.wav");
    std::fs::write(&path, b"definitely not a RIFF container").unwrap();

    assert!(wav::inspect(&path).is_err());
}

#[test]
fn inspect_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(wav::inspect(&dir.path().join("absent.wav")).is_err());
}
