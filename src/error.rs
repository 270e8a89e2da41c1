//! Error types for wavrec
//!
//! Uses thiserror for ergonomic error definitions. Capture-path faults
//! are reported at component boundaries and never terminate a session:
//! partial audio is always preferred over losing a recording.

use thiserror::Error;

/// Top-level error type for the wavrec application
#[derive(Error, Debug)]
pub enum WavrecError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio capture error: {0}")]
    Audio(#[from] AudioError),

    #[error("WAV file error: {0}")]
    Wav(#[from] WavError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to audio capture
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Could not open audio input: {0}")]
    DeviceOpen(String),

    #[error("Audio device not found: '{0}'. List devices with: wavrec devices")]
    DeviceNotFound(String),

    #[error("Audio stream read failed: {0}")]
    StreamRead(String),

    #[error("No audio was captured. Check your microphone.")]
    EmptyRecording,

    #[error("Capture thread did not stop within the bounded wait")]
    StopTimeout,
}

/// Errors related to WAV file writing and inspection
#[derive(Error, Debug)]
pub enum WavError {
    #[error("WAV file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV encoding/decoding failed: {0}")]
    Codec(#[from] hound::Error),
}

/// Result type alias using WavrecError
pub type Result<T> = std::result::Result<T, WavrecError>;
