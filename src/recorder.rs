//! Recorder module - control loop orchestration
//!
//! Coordinates the interactive control surface, the capture engine,
//! and the WAV save/inspect flow around the Idle → Recording →
//! Stopping → Idle state machine. Only one session is ever active.

use crate::audio::{self, AudioCapture, FrameBuffer};
use crate::config::Config;
use crate::error::{AudioError, Result};
use crate::state::State;
use crate::wav;
use chrono::{DateTime, Local};
use std::io::Write as _;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};

/// Elapsed-time report period while recording
const TICK: Duration = Duration::from_millis(100);

/// Controller that owns the state machine and the capture engine
pub struct Recorder {
    config: Config,
    state: State,
    capture: Option<Box<dyn AudioCapture>>,
}

impl Recorder {
    /// Create a new recorder with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: State::Idle,
            capture: None,
        }
    }

    /// Run the interactive control loop: Enter toggles recording,
    /// Ctrl+C or SIGTERM shuts down. The 100 ms ticker drives the
    /// elapsed-time display while a session is active.
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = tokio::time::interval(TICK);
        let mut sigterm = signal(SignalKind::terminate())?;

        println!("Press Enter to start or stop recording. Ctrl+C quits.");

        loop {
            tokio::select! {
                line = lines.next_line() => match line {
                    Ok(Some(_)) => self.toggle().await,
                    Ok(None) => {
                        // stdin closed
                        self.shutdown().await;
                        break;
                    }
                    Err(e) => {
                        tracing::warn!("Control input error: {}", e);
                        self.shutdown().await;
                        break;
                    }
                },
                _ = ticker.tick() => self.report_elapsed(),
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    tracing::info!("Interrupt received, shutting down");
                    self.shutdown().await;
                    break;
                }
                _ = sigterm.recv() => {
                    tracing::info!("SIGTERM received, shutting down");
                    self.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Start when idle, stop when recording; ignored mid-stop
    pub async fn toggle(&mut self) {
        match self.state {
            State::Idle => self.start().await,
            State::Recording { .. } => self.stop().await,
            State::Stopping => tracing::debug!("Toggle ignored while stopping"),
        }
    }

    /// Begin a new session. No-op unless idle: a second start leaves
    /// the running session unchanged.
    pub async fn start(&mut self) {
        if !self.state.is_idle() {
            tracing::debug!("Start ignored in state {}", self.state);
            return;
        }

        let mut capture = match audio::create_capture(&self.config.audio) {
            Ok(capture) => capture,
            Err(e) => {
                tracing::error!("Could not create capture engine: {}", e);
                return;
            }
        };

        match capture.start().await {
            Ok(()) => {
                self.capture = Some(capture);
                self.state = State::Recording {
                    started_at: Instant::now(),
                    started_wall: Local::now(),
                };
                tracing::info!("Recording started");
                println!("Recording... press Enter to stop.");
            }
            Err(e) => {
                // Stream never opened; stay idle.
                tracing::error!("Could not start recording: {}", e);
            }
        }
    }

    /// End the active session: reclaim the buffer from the capture
    /// thread, save it if anything was captured, and report the file's
    /// metrics. No-op unless recording. Ends in Idle whatever happens.
    pub async fn stop(&mut self) {
        let started_wall = match self.state.session_start() {
            Some(started_wall) => started_wall,
            None => {
                tracing::debug!("Stop ignored in state {}", self.state);
                return;
            }
        };
        let elapsed = self.state.recording_duration().unwrap_or_default();
        self.state = State::Stopping;

        println!("\rRecording: {:6.1} s", 0.0);
        tracing::info!("Recording stopped ({:.1}s)", elapsed.as_secs_f32());

        if let Some(mut capture) = self.capture.take() {
            match capture.stop().await {
                Ok(frames) => {
                    tracing::info!(
                        "Captured {} chunks ({} samples)",
                        frames.chunk_count(),
                        frames.sample_count()
                    );
                    self.save_and_report(&frames, &started_wall);
                }
                Err(AudioError::EmptyRecording) => {
                    tracing::info!("Nothing captured, no file written");
                }
                Err(AudioError::StopTimeout) => {
                    tracing::warn!(
                        "Capture thread did not stop in time; detaching without saving"
                    );
                }
                Err(e) => {
                    tracing::error!("Capture stop failed: {}", e);
                }
            }
        }

        self.state = State::Idle;
    }

    /// Force-stop any active session and release the capture engine.
    /// Safe to call more than once.
    pub async fn shutdown(&mut self) {
        if self.state.is_recording() {
            self.stop().await;
        }
        self.capture.take();
        tracing::debug!("Recorder shut down");
    }

    /// Rewrite the elapsed-time line; reports nothing outside Recording
    fn report_elapsed(&self) {
        if let Some(elapsed) = self.state.recording_duration() {
            print!("\rRecording: {:6.1} s", elapsed.as_secs_f64());
            let _ = std::io::stdout().flush();
        }
    }

    fn save_and_report(&self, frames: &FrameBuffer, started: &DateTime<Local>) {
        match wav::write_session(frames, &self.config.audio, started, &self.config.output.dir) {
            Ok(path) => {
                tracing::info!("Saved {}", path.display());
                match wav::inspect(&path) {
                    Ok(metrics) => print!("{}", metrics.report(&path)),
                    Err(e) => {
                        tracing::error!("Could not inspect {}: {}", path.display(), e);
                    }
                }
            }
            Err(e) => {
                tracing::error!("Could not save recording: {}", e);
            }
        }
    }
}
