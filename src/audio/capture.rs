//! cpal-based audio capture
//!
//! Uses the cpal crate for cross-platform audio input.
//! Works with PipeWire, PulseAudio, and ALSA backends.
//!
//! Note: cpal::Stream is not Send, so the stream lives on a dedicated
//! capture thread. The stream callback forwards converted chunks over a
//! bounded channel; the capture thread accumulates them into a
//! FrameBuffer it exclusively owns, and hands the buffer back through a
//! oneshot channel when the cooperative stop flag is cleared. The
//! handoff plus the thread join is the only synchronization point, so
//! the buffer itself needs no lock.

use super::{AudioCapture, FrameBuffer};
use crate::config::AudioConfig;
use crate::error::AudioError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::oneshot;

/// Bounded wait for the capture thread to hand its buffer back
pub const STOP_TIMEOUT: Duration = Duration::from_millis(1000);

/// How often the capture loop rechecks the stop flag while no chunk
/// arrives
const RECV_TICK: Duration = Duration::from_millis(100);

/// Chunks buffered between the stream callback and the capture loop.
/// A full queue drops the incoming chunk instead of blocking the
/// audio callback.
const CHUNK_QUEUE_DEPTH: usize = 64;

/// cpal-based audio capture implementation
pub struct CpalCapture {
    /// Audio configuration
    config: AudioConfig,
    /// Cooperative stop flag, checked once per loop iteration
    keep_running: Arc<AtomicBool>,
    /// Receives the FrameBuffer when the capture loop exits
    result_rx: Option<oneshot::Receiver<FrameBuffer>>,
    /// Handle to the capture thread
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl CpalCapture {
    /// Create a new cpal audio capture instance
    pub fn new(config: &AudioConfig) -> Result<Self, AudioError> {
        Ok(Self {
            config: config.clone(),
            keep_running: Arc::new(AtomicBool::new(false)),
            result_rx: None,
            thread_handle: None,
        })
    }
}

#[async_trait::async_trait]
impl AudioCapture for CpalCapture {
    async fn start(&mut self) -> Result<(), AudioError> {
        use cpal::traits::DeviceTrait;

        // Resolve the device and its native sample format before
        // spawning the thread
        let host = cpal::default_host();
        let device = super::device::resolve(&host, &self.config.device)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let native = device
            .default_input_config()
            .map_err(|e| AudioError::DeviceOpen(e.to_string()))?;
        let sample_format = native.sample_format();

        let stream_config = cpal::StreamConfig {
            channels: self.config.channels,
            sample_rate: cpal::SampleRate(self.config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(self.config.chunk_size),
        };

        self.keep_running.store(true, Ordering::Relaxed);
        let keep_running = self.keep_running.clone();

        let (ready_tx, ready_rx) = oneshot::channel();
        let (result_tx, result_rx) = oneshot::channel();

        let thread_handle = thread::spawn(move || {
            capture_loop(
                device,
                stream_config,
                sample_format,
                keep_running,
                ready_tx,
                result_tx,
            );
        });

        // The loop never starts if the stream cannot be opened; report
        // that here so the controller stays Idle.
        match ready_rx.await {
            Ok(Ok(())) => {
                self.result_rx = Some(result_rx);
                self.thread_handle = Some(thread_handle);
                tracing::info!(
                    "Capture started on '{}' ({} Hz, {} channel(s))",
                    device_name,
                    self.config.sample_rate,
                    self.config.channels
                );
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = thread_handle.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread_handle.join();
                Err(AudioError::DeviceOpen(
                    "capture thread exited before opening the stream".to_string(),
                ))
            }
        }
    }

    async fn stop(&mut self) -> Result<FrameBuffer, AudioError> {
        self.keep_running.store(false, Ordering::Relaxed);

        let result_rx = match self.result_rx.take() {
            Some(rx) => rx,
            None => return Err(AudioError::EmptyRecording),
        };

        let frames = match tokio::time::timeout(STOP_TIMEOUT, result_rx).await {
            Ok(Ok(frames)) => frames,
            Ok(Err(_)) => {
                if let Some(handle) = self.thread_handle.take() {
                    let _ = handle.join();
                }
                return Err(AudioError::StreamRead(
                    "capture thread exited without delivering audio".to_string(),
                ));
            }
            Err(_) => {
                // Detach: the thread exits on its next flag check, its
                // buffer is dropped with the channel.
                let _ = self.thread_handle.take();
                return Err(AudioError::StopTimeout);
            }
        };

        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }

        tracing::debug!(
            "Capture stopped: {} chunks ({} samples)",
            frames.chunk_count(),
            frames.sample_count()
        );

        if frames.is_empty() {
            return Err(AudioError::EmptyRecording);
        }

        Ok(frames)
    }
}

/// Body of the capture thread: open the stream, accumulate chunks into
/// the exclusively-owned FrameBuffer until the stop flag clears or the
/// stream fails, then close the stream and hand the buffer back.
/// Already-captured chunks survive a mid-session stream failure.
fn capture_loop(
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: cpal::SampleFormat,
    keep_running: Arc<AtomicBool>,
    ready_tx: oneshot::Sender<Result<(), AudioError>>,
    result_tx: oneshot::Sender<FrameBuffer>,
) {
    use cpal::traits::StreamTrait;

    let (chunk_tx, chunk_rx) = std::sync::mpsc::sync_channel::<Vec<i16>>(CHUNK_QUEUE_DEPTH);

    let failed = Arc::new(AtomicBool::new(false));
    let err_flag = failed.clone();
    let err_fn = move |err: cpal::StreamError| {
        tracing::error!("Audio stream error: {}", err);
        err_flag.store(true, Ordering::Relaxed);
    };

    let stream_result = match sample_format {
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, chunk_tx, err_fn),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, chunk_tx, err_fn),
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, chunk_tx, err_fn),
        format => Err(AudioError::DeviceOpen(format!(
            "unsupported sample format: {:?}",
            format
        ))),
    };

    let stream = match stream_result {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(AudioError::DeviceOpen(e.to_string())));
        return;
    }

    let _ = ready_tx.send(Ok(()));
    tracing::debug!("Capture thread started");

    let mut frames = FrameBuffer::new();
    while keep_running.load(Ordering::Relaxed) {
        if failed.load(Ordering::Relaxed) {
            tracing::warn!("Stream failed mid-session, keeping captured audio");
            break;
        }
        match chunk_rx.recv_timeout(RECV_TICK) {
            Ok(chunk) => frames.push(chunk),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Stop and close the stream before the handoff, whatever ended the
    // loop.
    drop(stream);

    // Collect chunks still queued at loop exit.
    while let Ok(chunk) = chunk_rx.try_recv() {
        frames.push(chunk);
    }

    let _ = result_tx.send(frames);
    tracing::debug!("Capture thread stopped");
}

/// Build an input stream for a specific sample type, converting each
/// callback buffer to 16-bit PCM and forwarding it as one chunk
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tx: SyncSender<Vec<i16>>,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::Sample + cpal::SizedSample + Send + 'static,
    i16: cpal::FromSample<T>,
{
    use cpal::traits::DeviceTrait;

    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                let chunk: Vec<i16> = data
                    .iter()
                    .map(|&s| <i16 as cpal::FromSample<T>>::from_sample_(s))
                    .collect();

                // A full queue means the consumer is behind; drop the
                // chunk rather than block the audio callback.
                let _ = tx.try_send(chunk);
            },
            err_fn,
            None,
        )
        .map_err(|e| AudioError::DeviceOpen(e.to_string()))?;

    Ok(stream)
}
