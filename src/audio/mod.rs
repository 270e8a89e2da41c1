//! Audio capture module
//!
//! Provides audio recording capabilities using cpal, which works with
//! PipeWire, PulseAudio, and ALSA backends.

pub mod capture;
pub mod device;
pub mod frames;

use crate::config::AudioConfig;
use crate::error::AudioError;

pub use frames::FrameBuffer;

/// Trait for audio capture implementations
#[async_trait::async_trait]
pub trait AudioCapture: Send + Sync {
    /// Open the input stream and start the capture thread
    async fn start(&mut self) -> Result<(), AudioError>;

    /// Stop capturing and hand back the recorded chunks
    async fn stop(&mut self) -> Result<FrameBuffer, AudioError>;
}

/// Factory function to create audio capture
pub fn create_capture(config: &AudioConfig) -> Result<Box<dyn AudioCapture>, AudioError> {
    Ok(Box::new(capture::CpalCapture::new(config)?))
}
