//! Wavrec: toggle-to-record microphone capture to WAV files
//!
//! This library provides the core functionality for:
//! - Selecting an input device (USB/Microphone name preference with a
//!   system-default fallback)
//! - Capturing audio via cpal on a dedicated thread (supports
//!   PipeWire, PulseAudio, and ALSA backends)
//! - Buffering PCM chunks in capture order and handing the buffer to
//!   the controller when the thread stops
//! - Serializing sessions to timestamped WAV files via hound and
//!   re-reading them for a metrics report
//!
//! # Architecture
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!                    │           Recorder           │
//!                    │  Idle → Recording → Stopping │
//!                    └──────────────────────────────┘
//!                        │                     │
//!            start/stop  │                     │  save + inspect
//!                        ▼                     ▼
//!              ┌──────────────┐        ┌──────────────┐
//!              │   Capture    │        │     WAV      │
//!              │ (cpal thread)│        │   (hound)    │
//!              └──────────────┘        └──────────────┘
//!                        │
//!                        ▼ FrameBuffer moved on stop
//!              ┌──────────────────────────────┐
//!              │  recording_<timestamp>.wav   │
//!              └──────────────────────────────┘
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod recorder;
pub mod state;
pub mod wav;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{Result, WavrecError};
pub use recorder::Recorder;
