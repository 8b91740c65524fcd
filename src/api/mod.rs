//! Typed client for the remote inference API
//!
//! Three endpoints: `/api/caption`, `/api/ask`, `/api/voice-ask`, plus a
//! fetch for the server-relative TTS audio the replies may point at.

pub mod client;
pub mod types;

pub use client::{resolve_tts_url, AskService, HttpAskService};
pub use types::{Answer, Caption, VoiceAnswer};
