//! Microphone capture, WAV assembly, and speech playback

pub mod playback;
pub mod recorder;
pub mod wav;

#[cfg(feature = "audio-io")]
pub mod input;

pub use playback::SpeechSink;
pub use recorder::{AudioCapture, RecordingSession, VoicePayload};

#[cfg(feature = "audio-io")]
pub use input::MicCapture;

#[cfg(feature = "audio-io")]
pub use playback::RodioSink;
