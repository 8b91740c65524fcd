//! Orchestrator for the three request flows
//!
//! The UI sends commands; the orchestrator processes them one at a time on
//! its own thread, owning the devices, the HTTP client, and the frame slot.
//! Serializing the flows through a single loop also serializes access to
//! the shared last-frame slot, so the flows can never race on it.
//!
//! Every flow follows the same discipline: mark its busy flag, run the
//! request cycle, surface the outcome (log entry or caption panel), and
//! clear the flag on every exit path.

use crate::api::{resolve_tts_url, Answer, AskService, Caption, VoiceAnswer};
use crate::audio::{AudioCapture, RecordingSession, SpeechSink, VoicePayload};
use crate::capture::{CapturedFrame, FrameSlot, VideoFeed};
use crate::config::ClientConfig;
use crate::messages::{ConversationLog, Speaker};
use crate::session::SharedSessionState;
use crate::{GlimpseError, Result};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

/// Prompt shown when the user submits an empty question
pub const EMPTY_QUESTION_NOTICE: &str = "질문을 입력해 주세요.";

/// Commands sent from the UI to the orchestrator
#[derive(Clone, Debug)]
pub enum AppCommand {
    /// Capture a fresh frame and request a scene caption
    Caption,
    /// Submit a typed question about the current scene
    Ask(String),
    /// Toggle the voice recording state machine
    ToggleVoice,
    /// Stop the command loop
    Shutdown,
}

/// Events emitted for UI notifications
///
/// State is queried directly from the shared session/log; events only
/// trigger repaints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    StateChanged,
    Shutdown,
}

/// Handle for controlling the orchestrator from the UI
pub struct OrchestratorHandle {
    command_tx: Sender<AppCommand>,
    event_rx: Receiver<AppEvent>,
    session: SharedSessionState,
    log: ConversationLog,
    frame_slot: FrameSlot,
}

impl OrchestratorHandle {
    pub fn send_command(&self, cmd: AppCommand) -> Result<()> {
        self.command_tx
            .send(cmd)
            .map_err(|e| GlimpseError::ChannelError(format!("Failed to send command: {}", e)))
    }

    /// Request a fresh caption of the current scene
    pub fn request_caption(&self) -> Result<()> {
        self.send_command(AppCommand::Caption)
    }

    /// Submit a typed question
    pub fn submit_question(&self, question: impl Into<String>) -> Result<()> {
        self.send_command(AppCommand::Ask(question.into()))
    }

    /// Toggle voice recording (start, or stop-and-submit)
    pub fn toggle_voice(&self) -> Result<()> {
        self.send_command(AppCommand::ToggleVoice)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send_command(AppCommand::Shutdown)
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<AppEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn session(&self) -> &SharedSessionState {
        &self.session
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn frame_slot(&self) -> &FrameSlot {
        &self.frame_slot
    }
}

/// Channel ends and shared state for an orchestrator under construction
///
/// Created together with the handle by [`wire`]; moved into the
/// orchestrator thread so device handles never have to cross threads.
pub struct OrchestratorWiring {
    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,
    session: SharedSessionState,
    log: ConversationLog,
    frame_slot: FrameSlot,
}

/// Create the handle/wiring pair connecting UI and orchestrator
pub fn wire(buffer_size: usize) -> (OrchestratorHandle, OrchestratorWiring) {
    let (command_tx, command_rx) = bounded(buffer_size);
    let (event_tx, event_rx) = bounded(buffer_size);
    let session = SharedSessionState::new();
    let log = ConversationLog::new();
    let frame_slot = FrameSlot::new();

    let handle = OrchestratorHandle {
        command_tx,
        event_rx,
        session: session.clone(),
        log: log.clone(),
        frame_slot: frame_slot.clone(),
    };

    let wiring = OrchestratorWiring {
        command_rx,
        event_tx,
        session,
        log,
        frame_slot,
    };

    (handle, wiring)
}

/// Devices and remote service an orchestrator drives
///
/// `feed` and `capture` are optional: a missing camera or microphone leaves
/// the corresponding actions failing visibly instead of preventing startup.
pub struct OrchestratorParts {
    pub service: Box<dyn AskService>,
    pub feed: Option<Box<dyn VideoFeed>>,
    pub capture: Option<Box<dyn AudioCapture>>,
    pub sink: Box<dyn SpeechSink>,
}

/// The command loop itself
pub struct Orchestrator {
    config: ClientConfig,
    service: Box<dyn AskService>,
    feed: Option<Box<dyn VideoFeed>>,
    capture: Option<Box<dyn AudioCapture>>,
    sink: Box<dyn SpeechSink>,

    session: SharedSessionState,
    log: ConversationLog,
    frame_slot: FrameSlot,

    command_rx: Receiver<AppCommand>,
    event_tx: Sender<AppEvent>,

    runtime: tokio::runtime::Runtime,

    /// Active voice recording, if any
    recording: Option<RecordingSession>,
    /// Fragment channel of the active recording
    fragment_rx: Option<Receiver<Vec<f32>>>,
}

impl Orchestrator {
    pub fn new(
        config: ClientConfig,
        parts: OrchestratorParts,
        wiring: OrchestratorWiring,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GlimpseError::ConfigError(format!("Failed to build runtime: {}", e)))?;

        wiring.session.write().camera_ready = parts.feed.is_some();
        if let Some(feed) = &parts.feed {
            info!("Video feed ready: {}", feed.describe());
        } else {
            warn!("No video feed available; capture actions will fail");
        }

        Ok(Self {
            config,
            service: parts.service,
            feed: parts.feed,
            capture: parts.capture,
            sink: parts.sink,
            session: wiring.session,
            log: wiring.log,
            frame_slot: wiring.frame_slot,
            command_rx: wiring.command_rx,
            event_tx: wiring.event_tx,
            runtime,
            recording: None,
            fragment_rx: None,
        })
    }

    /// Process commands until shutdown
    pub fn run(mut self) {
        info!("Orchestrator started");
        while let Ok(cmd) = self.command_rx.recv() {
            if matches!(cmd, AppCommand::Shutdown) {
                break;
            }
            self.process(cmd);
        }
        let _ = self.event_tx.try_send(AppEvent::Shutdown);
        info!("Orchestrator stopped");
    }

    /// Process a single command to completion
    pub fn process(&mut self, cmd: AppCommand) {
        debug!("Processing command: {:?}", cmd);
        match cmd {
            AppCommand::Caption => self.run_caption(),
            AppCommand::Ask(question) => self.run_ask(question),
            AppCommand::ToggleVoice => self.run_voice_toggle(),
            AppCommand::Shutdown => {}
        }
    }

    fn emit_state_changed(&self) {
        let _ = self.event_tx.try_send(AppEvent::StateChanged);
    }

    // === Frame access ===

    /// Grab and encode a fresh frame, overwriting the slot
    fn capture_fresh(&mut self) -> Result<CapturedFrame> {
        let feed = self
            .feed
            .as_mut()
            .ok_or_else(|| GlimpseError::CameraError("no video feed available".to_string()))?;
        let raw = feed.grab()?;
        let frame = CapturedFrame::from_raw(&raw)?;
        self.frame_slot.replace(frame.clone());
        Ok(frame)
    }

    /// Reuse the slot frame; capture fresh only when the slot is empty
    fn frame_for_question(&mut self) -> Result<CapturedFrame> {
        if let Some(frame) = self.frame_slot.latest() {
            return Ok(frame);
        }
        self.capture_fresh()
    }

    // === Caption flow ===

    fn run_caption(&mut self) {
        self.session.write().caption_busy = true;
        self.emit_state_changed();

        let outcome = self.caption_cycle();

        {
            let mut session = self.session.write();
            match outcome {
                Ok((caption, speech_link)) => {
                    session.caption.set_result(caption.source, caption.translated);
                    session.caption.speech_link = speech_link;
                }
                Err(e) => {
                    warn!("Caption request failed: {}", e);
                    session.caption.set_error(e.user_message());
                }
            }
            session.caption_busy = false;
        }
        self.emit_state_changed();
    }

    /// Capture, request, and attempt automatic speech playback
    ///
    /// Returns the caption plus a fallback link when playback was attempted
    /// and failed.
    fn caption_cycle(&mut self) -> Result<(Caption, Option<String>)> {
        let frame = self.capture_fresh()?;
        let image = frame.to_base64();
        let caption = self.runtime.block_on(self.service.caption(&image))?;

        let mut speech_link = None;
        if let Some(url) = caption.tts_url.clone() {
            if let Err(e) = self.play_speech(&url) {
                warn!("Automatic caption playback failed: {}", e);
                speech_link = Some(resolve_tts_url(&self.config.server_url, &url));
            }
        }

        Ok((caption, speech_link))
    }

    // === Text question flow ===

    fn run_ask(&mut self, question: String) {
        let question = question.trim().to_string();
        if question.is_empty() {
            self.session.write().notice = Some(EMPTY_QUESTION_NOTICE.to_string());
            self.emit_state_changed();
            return;
        }

        {
            let mut session = self.session.write();
            session.ask_busy = true;
            session.notice = None;
        }
        self.emit_state_changed();

        self.log.append(Speaker::User, question.clone());

        match self.ask_cycle(&question) {
            Ok(answer) => {
                self.log.append(Speaker::Assistant, answer.text.clone());
                self.play_best_effort(answer.tts_url.as_deref());
            }
            Err(e) => {
                warn!("Ask request failed: {}", e);
                self.log.append(Speaker::System, e.user_message());
            }
        }

        self.session.write().ask_busy = false;
        self.emit_state_changed();
    }

    fn ask_cycle(&mut self, question: &str) -> Result<Answer> {
        let frame = self.frame_for_question()?;
        let image = frame.to_base64();
        self.runtime.block_on(self.service.ask(question, &image))
    }

    // === Voice question flow ===

    fn run_voice_toggle(&mut self) {
        if self.session.read().recording.is_recording() {
            self.finish_voice();
        } else {
            self.start_voice();
        }
    }

    fn start_voice(&mut self) {
        let Some(capture) = self.capture.as_mut() else {
            self.log.append(
                Speaker::System,
                GlimpseError::AudioDeviceError("no capture device".to_string()).user_message(),
            );
            self.emit_state_changed();
            return;
        };

        if !self.session.write().start_recording() {
            return;
        }

        let (fragment_tx, fragment_rx) = unbounded();
        match capture.start(fragment_tx) {
            Ok(()) => {
                self.recording = Some(RecordingSession::new(capture.sample_rate()));
                self.fragment_rx = Some(fragment_rx);
            }
            Err(e) => {
                warn!("Failed to start voice recording: {}", e);
                self.session.write().stop_recording();
                self.log.append(Speaker::System, e.user_message());
            }
        }
        self.emit_state_changed();
    }

    fn finish_voice(&mut self) {
        if let Some(capture) = self.capture.as_mut() {
            if let Err(e) = capture.stop() {
                warn!("Failed to stop capture cleanly: {}", e);
            }
        }

        {
            let mut session = self.session.write();
            session.stop_recording();
            session.voice_busy = true;
        }
        self.emit_state_changed();

        let outcome = self
            .assemble_payload()
            .and_then(|payload| self.voice_cycle(payload));

        match outcome {
            Ok(voice) => {
                self.log.append(Speaker::User, voice.question.clone());
                self.log.append(Speaker::Assistant, voice.answer.clone());
                self.play_best_effort(voice.tts_url.as_deref());
            }
            Err(e) => {
                warn!("Voice request failed: {}", e);
                self.log.append(Speaker::System, e.user_message());
            }
        }

        self.session.write().voice_busy = false;
        self.emit_state_changed();
    }

    /// Drain pending fragments and assemble the recording into one payload
    fn assemble_payload(&mut self) -> Result<VoicePayload> {
        let mut recording = self.recording.take().ok_or_else(|| {
            GlimpseError::AudioDeviceError("no active recording session".to_string())
        })?;

        if let Some(rx) = self.fragment_rx.take() {
            while let Ok(fragment) = rx.try_recv() {
                recording.push_fragment(fragment);
            }
        }

        debug!(
            "Assembled {} fragments, {:.2}s of audio",
            recording.fragment_count(),
            recording.duration_seconds()
        );

        let payload = recording.finalize()?;
        if payload.is_silent() {
            warn!("Submitting voice question with no captured audio");
        }
        Ok(payload)
    }

    fn voice_cycle(&mut self, payload: VoicePayload) -> Result<VoiceAnswer> {
        let frame = self.frame_for_question()?;
        let image = frame.to_base64();
        self.runtime
            .block_on(self.service.voice_ask(payload.wav, &image))
    }

    // === Speech playback ===

    fn play_speech(&mut self, tts_url: &str) -> Result<()> {
        let audio = self.runtime.block_on(self.service.fetch_speech(tts_url))?;
        self.sink.play(audio)
    }

    /// Playback for question answers: failures are logged, never surfaced
    fn play_best_effort(&mut self, tts_url: Option<&str>) {
        if let Some(url) = tts_url {
            if let Err(e) = self.play_speech(url) {
                warn!("Answer playback failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_connects_handle_and_wiring() {
        let (handle, wiring) = wire(4);
        handle.send_command(AppCommand::Caption).unwrap();
        let cmd = wiring.command_rx.try_recv().unwrap();
        assert!(matches!(cmd, AppCommand::Caption));

        wiring.event_tx.try_send(AppEvent::StateChanged).unwrap();
        assert_eq!(handle.try_recv_event(), Some(AppEvent::StateChanged));
    }

    #[test]
    fn test_wire_shares_session_and_log() {
        let (handle, wiring) = wire(4);
        wiring.session.write().caption_busy = true;
        assert!(handle.session().caption_busy());

        wiring.log.append(Speaker::System, "hello");
        assert_eq!(handle.log().len(), 1);
    }
}
