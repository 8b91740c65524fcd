//! HTTP client for the inference API

use crate::api::types::{
    Answer, AskReply, AskRequest, Caption, CaptionReply, CaptionRequest, VoiceAnswer, VoiceReply,
};
use crate::{GlimpseError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// The three request exchanges the client performs, plus TTS audio fetch
///
/// Trait seam so flows can be exercised against a scripted double; the real
/// implementation is [`HttpAskService`].
#[async_trait]
pub trait AskService {
    /// `POST /api/caption` with the base64 JPEG
    async fn caption(&self, image_b64: &str) -> Result<Caption>;

    /// `POST /api/ask` with the question text and base64 JPEG
    async fn ask(&self, question: &str, image_b64: &str) -> Result<Answer>;

    /// `POST /api/voice-ask` with the WAV payload and base64 JPEG
    async fn voice_ask(&self, audio_wav: Vec<u8>, image_b64: &str) -> Result<VoiceAnswer>;

    /// Fetch the synthesized speech audio at a server-relative TTS URL
    async fn fetch_speech(&self, tts_url: &str) -> Result<Vec<u8>>;
}

/// Resolve a server-relative TTS path against the server origin
///
/// Absolute URLs pass through untouched.
pub fn resolve_tts_url(server_url: &str, tts_url: &str) -> String {
    if tts_url.starts_with("http://") || tts_url.starts_with("https://") {
        return tts_url.to_string();
    }
    let base = server_url.trim_end_matches('/');
    if tts_url.starts_with('/') {
        format!("{}{}", base, tts_url)
    } else {
        format!("{}/{}", base, tts_url)
    }
}

/// reqwest-backed implementation of [`AskService`]
///
/// No timeout is configured here; the transport's defaults apply, and
/// nothing is retried.
pub struct HttpAskService {
    server_url: String,
    http: reqwest::Client,
}

impl HttpAskService {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.server_url.trim_end_matches('/'), path)
    }
}

fn transport(e: reqwest::Error) -> GlimpseError {
    GlimpseError::TransportError(e.to_string())
}

#[async_trait]
impl AskService for HttpAskService {
    async fn caption(&self, image_b64: &str) -> Result<Caption> {
        debug!("POST /api/caption ({} base64 bytes)", image_b64.len());

        let reply: CaptionReply = self
            .http
            .post(self.endpoint("/api/caption"))
            .json(&CaptionRequest { image: image_b64 })
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        reply.into_result().map_err(GlimpseError::ServiceError)
    }

    async fn ask(&self, question: &str, image_b64: &str) -> Result<Answer> {
        debug!("POST /api/ask ({:?})", question);

        let reply: AskReply = self
            .http
            .post(self.endpoint("/api/ask"))
            .json(&AskRequest {
                question,
                image: image_b64,
            })
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        reply.into_result().map_err(GlimpseError::ServiceError)
    }

    async fn voice_ask(&self, audio_wav: Vec<u8>, image_b64: &str) -> Result<VoiceAnswer> {
        debug!("POST /api/voice-ask ({} audio bytes)", audio_wav.len());

        let audio_part = Part::bytes(audio_wav)
            .file_name("question.wav")
            .mime_str("audio/wav")
            .map_err(transport)?;

        let form = Form::new()
            .part("audio", audio_part)
            .text("image", image_b64.to_string());

        let reply: VoiceReply = self
            .http
            .post(self.endpoint("/api/voice-ask"))
            .multipart(form)
            .send()
            .await
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;

        reply.into_result().map_err(GlimpseError::ServiceError)
    }

    async fn fetch_speech(&self, tts_url: &str) -> Result<Vec<u8>> {
        let url = resolve_tts_url(&self.server_url, tts_url);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        let bytes = response.bytes().await.map_err(transport)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_tts_url("http://127.0.0.1:5000", "/tts/caption.mp3"),
            "http://127.0.0.1:5000/tts/caption.mp3"
        );
    }

    #[test]
    fn test_resolve_handles_trailing_slash() {
        assert_eq!(
            resolve_tts_url("http://127.0.0.1:5000/", "/tts/a.mp3"),
            "http://127.0.0.1:5000/tts/a.mp3"
        );
        assert_eq!(
            resolve_tts_url("http://127.0.0.1:5000", "tts/a.mp3"),
            "http://127.0.0.1:5000/tts/a.mp3"
        );
    }

    #[test]
    fn test_resolve_passes_absolute_urls_through() {
        assert_eq!(
            resolve_tts_url("http://127.0.0.1:5000", "https://cdn.example.com/a.mp3"),
            "https://cdn.example.com/a.mp3"
        );
    }

    #[test]
    fn test_endpoint_join() {
        let service = HttpAskService::new("http://localhost:5000");
        assert_eq!(
            service.endpoint("/api/caption"),
            "http://localhost:5000/api/caption"
        );
    }
}
