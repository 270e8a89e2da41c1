//! State machine for the recording controller
//!
//! Defines the states for the toggle-to-record workflow:
//! Idle → Recording → Stopping → Idle
//!
//! At most one session is ever in Recording or Stopping at a time.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Controller state
#[derive(Debug, Clone, Copy)]
pub enum State {
    /// Waiting for a start request
    Idle,

    /// Capture thread running, chunks accumulating
    Recording {
        /// When recording started (monotonic, for elapsed-time display)
        started_at: Instant,
        /// Wall-clock start, used to derive the output filename
        started_wall: DateTime<Local>,
    },

    /// Stop requested, waiting for the capture thread to hand its buffer back
    Stopping,
}

impl State {
    /// Create a new idle state
    pub fn new() -> Self {
        State::Idle
    }

    /// Check if in idle state
    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// Check if in recording state
    pub fn is_recording(&self) -> bool {
        matches!(self, State::Recording { .. })
    }

    /// Check if a stop is in flight
    pub fn is_stopping(&self) -> bool {
        matches!(self, State::Stopping)
    }

    /// Get elapsed time since the session started, if currently recording
    pub fn recording_duration(&self) -> Option<Duration> {
        match self {
            State::Recording { started_at, .. } => Some(started_at.elapsed()),
            _ => None,
        }
    }

    /// Get the wall-clock session start, if currently recording
    pub fn session_start(&self) -> Option<DateTime<Local>> {
        match self {
            State::Recording { started_wall, .. } => Some(*started_wall),
            _ => None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Idle => write!(f, "Idle"),
            State::Recording { started_at, .. } => {
                write!(f, "Recording ({:.1}s)", started_at.elapsed().as_secs_f32())
            }
            State::Stopping => write!(f, "Stopping"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_now() -> State {
        State::Recording {
            started_at: Instant::now(),
            started_wall: Local::now(),
        }
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = State::new();
        assert!(state.is_idle());
        assert!(!state.is_recording());
        assert!(!state.is_stopping());
    }

    #[test]
    fn test_recording_state() {
        let state = recording_now();
        assert!(state.is_recording());
        assert!(!state.is_idle());
        assert!(state.recording_duration().is_some());
        assert!(state.session_start().is_some());
    }

    #[test]
    fn test_idle_has_no_duration() {
        let state = State::Idle;
        assert!(state.recording_duration().is_none());
        assert!(state.session_start().is_none());
    }

    #[test]
    fn test_stopping_has_no_duration() {
        let state = State::Stopping;
        assert!(state.is_stopping());
        assert!(state.recording_duration().is_none());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(format!("{}", State::Idle), "Idle");
        assert_eq!(format!("{}", State::Stopping), "Stopping");
        assert!(format!("{}", recording_now()).starts_with("Recording"));
    }
}
