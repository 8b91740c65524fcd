//! Shared session state for the capture-and-ask client
//!
//! The orchestrator writes state changes while processing commands; the UI
//! reads it for rendering. The recording toggle is a two-state machine with
//! guarded transitions, so overlapping recording sessions are
//! unrepresentable. Each request flow has its own busy flag: the triggering
//! control is disabled while its request is in flight and re-enabled on
//! every exit path.

use parking_lot::RwLock;
use std::sync::Arc;

/// Voice recording state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordingState {
    /// No recording in progress
    #[default]
    Idle,
    /// Actively accumulating audio from the microphone
    Recording,
}

impl RecordingState {
    pub fn is_recording(&self) -> bool {
        matches!(self, RecordingState::Recording)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RecordingState::Idle)
    }
}

impl std::fmt::Display for RecordingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingState::Idle => write!(f, "Idle"),
            RecordingState::Recording => write!(f, "Recording"),
        }
    }
}

/// What the caption panel currently shows
#[derive(Clone, Debug, Default)]
pub struct CaptionView {
    /// Caption in the vision model's source language
    pub source: Option<String>,
    /// Translated description
    pub translated: Option<String>,
    /// Fallback link shown when automatic speech playback failed
    pub speech_link: Option<String>,
    /// Error message (service message verbatim, or the generic transport text)
    pub error: Option<String>,
}

impl CaptionView {
    /// Show a successful caption, clearing any previous error
    pub fn set_result(&mut self, source: String, translated: String) {
        self.source = Some(source);
        self.translated = Some(translated);
        self.speech_link = None;
        self.error = None;
    }

    /// Show an error, keeping the previous caption text off-screen
    pub fn set_error(&mut self, message: String) {
        self.source = None;
        self.translated = None;
        self.speech_link = None;
        self.error = Some(message);
    }
}

/// Session state shared between orchestrator and UI
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Voice toggle state machine
    pub recording: RecordingState,

    /// Caption request in flight
    pub caption_busy: bool,
    /// Text question request in flight
    pub ask_busy: bool,
    /// Voice question submitted, awaiting the reply
    pub voice_busy: bool,

    /// Caption panel contents
    pub caption: CaptionView,

    /// Whether a video feed was available at startup
    pub camera_ready: bool,

    /// Transient user-facing notice (e.g. empty-question prompt)
    pub notice: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarded Idle → Recording transition
    ///
    /// Refused while a previous voice request is still awaiting its reply or
    /// a recording is already active.
    pub fn start_recording(&mut self) -> bool {
        if self.recording.is_idle() && !self.voice_busy {
            self.recording = RecordingState::Recording;
            self.notice = None;
            true
        } else {
            false
        }
    }

    /// Guarded Recording → Idle transition
    pub fn stop_recording(&mut self) -> bool {
        if self.recording.is_recording() {
            self.recording = RecordingState::Idle;
            true
        } else {
            false
        }
    }

    /// Whether any request flow is currently in flight
    pub fn any_busy(&self) -> bool {
        self.caption_busy || self.ask_busy || self.voice_busy
    }
}

/// Thread-safe shared session state
#[derive(Clone, Default)]
pub struct SharedSessionState {
    inner: Arc<RwLock<SessionState>>,
}

impl SharedSessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, SessionState> {
        self.inner.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, SessionState> {
        self.inner.write()
    }

    /// Clone out the current state (no lock held after return)
    pub fn snapshot(&self) -> SessionState {
        self.inner.read().clone()
    }

    // === Convenience read methods ===

    pub fn is_recording(&self) -> bool {
        self.inner.read().recording.is_recording()
    }

    pub fn caption_busy(&self) -> bool {
        self.inner.read().caption_busy
    }

    pub fn ask_busy(&self) -> bool {
        self.inner.read().ask_busy
    }

    pub fn voice_busy(&self) -> bool {
        self.inner.read().voice_busy
    }

    pub fn camera_ready(&self) -> bool {
        self.inner.read().camera_ready
    }
}
