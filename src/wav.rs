//! WAV serialization and inspection
//!
//! Writing goes through hound: a canonical RIFF/WAVE container with a
//! PCM format chunk and a data payload equal to the FrameBuffer's
//! chunks concatenated in capture order — no resampling, no trimming.
//! Inspection re-opens the written file and derives its metrics purely
//! from the header and byte size, which doubles as a verification pass
//! over the artifact.

use crate::audio::FrameBuffer;
use crate::config::AudioConfig;
use crate::error::WavError;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Sample encoding written by this tool, as shown in reports
const SAMPLE_ENCODING: &str = "16-bit Signed Integer PCM";

/// Serialize a session's chunks to `recording_<YYYYMMDD_HHMMSS>.wav`
/// in `dir`, deriving the name from the session's wall-clock start.
/// An existing file is never overwritten; a `_2`, `_3`, … suffix is
/// appended until a free name is found.
pub fn write_session(
    frames: &FrameBuffer,
    config: &AudioConfig,
    started: &DateTime<Local>,
    dir: &Path,
) -> Result<PathBuf, WavError> {
    let path = unique_path(dir, &session_filename(started));

    let spec = hound::WavSpec {
        channels: config.channels,
        sample_rate: config.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(&path, spec)?;
    for chunk in frames.chunks() {
        for &sample in chunk {
            writer.write_sample(sample)?;
        }
    }
    writer.finalize()?;

    Ok(path)
}

/// Derive the output filename from the session start timestamp
fn session_filename(started: &DateTime<Local>) -> String {
    format!("recording_{}.wav", started.format("%Y%m%d_%H%M%S"))
}

/// First free path for `name` in `dir`, suffixing `_2`, `_3`, … on
/// collision
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let stem = name.strip_suffix(".wav").unwrap_or(name);
    let mut n = 2;
    loop {
        let candidate = dir.join(format!("{}_{}.wav", stem, n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Metrics derived from a WAV file's header and size
#[derive(Debug, Clone)]
pub struct WaveMetrics {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Sample frames per channel
    pub frames: u32,
    /// On-disk size in bytes, container included
    pub file_size: u64,
}

/// Read a WAV file's header and compute its metrics. Malformed data
/// and I/O problems are reported as WavError, never fatal.
pub fn inspect(path: &Path) -> Result<WaveMetrics, WavError> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let frames = reader.duration();
    let file_size = std::fs::metadata(path)?.len();

    Ok(WaveMetrics {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        frames,
        file_size,
    })
}

impl WaveMetrics {
    /// Sample precision in bits
    pub fn precision_bits(&self) -> u16 {
        self.bits_per_sample
    }

    /// Playback duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames as f64 / self.sample_rate as f64
    }

    /// Encoded audio bits per second of playback
    pub fn bit_rate(&self) -> u64 {
        self.sample_rate as u64 * self.bits_per_sample as u64 * self.channels as u64
    }

    /// File size with B/k/M suffix and one-decimal rounding
    pub fn human_size(&self) -> String {
        human_size(self.file_size)
    }

    /// Duration formatted as MM:SS.ss
    pub fn duration_display(&self) -> String {
        format_duration(self.duration_secs())
    }

    /// Formatted attribute block for a recorded file
    pub fn report(&self, path: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Input File     : '{}'", path.display());
        let _ = writeln!(out, "Channels       : {}", self.channels);
        let _ = writeln!(out, "Sample Rate    : {}", self.sample_rate);
        let _ = writeln!(out, "Precision      : {}-bit", self.precision_bits());
        let _ = writeln!(
            out,
            "Duration       : {} = {} samples",
            self.duration_display(),
            self.frames
        );
        let _ = writeln!(out, "File Size      : {}", self.human_size());
        let _ = writeln!(out, "Bit Rate       : {:.1}k", self.bit_rate() as f64 / 1000.0);
        let _ = writeln!(out, "Sample Encoding: {}", SAMPLE_ENCODING);
        out
    }
}

/// Humanize a byte count: thresholds at 1024 and 1024*1024, one
/// decimal, suffixes B/k/M
pub fn human_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes >= MIB {
        format!("{:.1}M", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1}k", bytes as f64 / KIB as f64)
    } else {
        format!("{}B", bytes)
    }
}

fn format_duration(secs: f64) -> String {
    let minutes = (secs / 60.0).floor() as u64;
    let seconds = secs - minutes as f64 * 60.0;
    format!("{:02}:{:05.2}", minutes, seconds)
}
