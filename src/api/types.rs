//! Wire types for the inference API
//!
//! The caption endpoint reports failures as an `error` *string* in the body;
//! the two question endpoints report them as an `error` *boolean* with the
//! message riding in `answer`. Both shapes fold into the service-error side
//! of the client's error taxonomy.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/caption`
#[derive(Debug, Serialize)]
pub struct CaptionRequest<'a> {
    pub image: &'a str,
}

/// Body of `POST /api/ask`
#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub image: &'a str,
}

/// Raw reply of `POST /api/caption`
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionReply {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub raw_caption: Option<String>,
    #[serde(default)]
    pub korean_caption: Option<String>,
    #[serde(default)]
    pub tts_url: Option<String>,
}

impl CaptionReply {
    /// Split the reply into a caption or the service's error message
    pub fn into_result(self) -> Result<Caption, String> {
        if let Some(message) = self.error {
            return Err(message);
        }
        Ok(Caption {
            source: self.raw_caption.unwrap_or_default(),
            translated: self.korean_caption.unwrap_or_default(),
            tts_url: self.tts_url,
        })
    }
}

/// A successful scene caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    /// Caption in the vision model's source language
    pub source: String,
    /// Translated description read to the user
    pub translated: String,
    pub tts_url: Option<String>,
}

/// Raw reply of `POST /api/ask`
#[derive(Debug, Clone, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub tts_url: Option<String>,
}

impl AskReply {
    pub fn into_result(self) -> Result<Answer, String> {
        if self.error {
            return Err(self.answer);
        }
        Ok(Answer {
            text: self.answer,
            tts_url: self.tts_url,
        })
    }
}

/// A successful answer to a typed question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub tts_url: Option<String>,
}

/// Raw reply of `POST /api/voice-ask`
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceReply {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub tts_url: Option<String>,
}

impl VoiceReply {
    pub fn into_result(self) -> Result<VoiceAnswer, String> {
        if self.error {
            return Err(self.answer);
        }
        Ok(VoiceAnswer {
            question: self.question,
            answer: self.answer,
            tts_url: self.tts_url,
        })
    }
}

/// A successful answer to a spoken question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceAnswer {
    /// The server's transcription of the uploaded audio
    pub question: String,
    pub answer: String,
    pub tts_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_success_reply() {
        let reply: CaptionReply = serde_json::from_str(
            r#"{"raw_caption": "a dog on a sofa", "korean_caption": "소파 위에 강아지가 있습니다.", "tts_url": "/tts/caption.mp3"}"#,
        )
        .unwrap();

        let caption = reply.into_result().unwrap();
        assert_eq!(caption.source, "a dog on a sofa");
        assert_eq!(caption.translated, "소파 위에 강아지가 있습니다.");
        assert_eq!(caption.tts_url.as_deref(), Some("/tts/caption.mp3"));
    }

    #[test]
    fn test_caption_error_is_string_message() {
        let reply: CaptionReply =
            serde_json::from_str(r#"{"error": "image field not found"}"#).unwrap();
        assert_eq!(reply.into_result().unwrap_err(), "image field not found");
    }

    #[test]
    fn test_caption_null_tts_url() {
        let reply: CaptionReply = serde_json::from_str(
            r#"{"raw_caption": "x", "korean_caption": "y", "tts_url": null}"#,
        )
        .unwrap();
        assert!(reply.into_result().unwrap().tts_url.is_none());
    }

    #[test]
    fn test_ask_success_reply() {
        let reply: AskReply = serde_json::from_str(
            r#"{"answer": "책상 위에 컵이 있습니다.", "error": false, "tts_url": "/tts/answer_1.mp3"}"#,
        )
        .unwrap();

        let answer = reply.into_result().unwrap();
        assert_eq!(answer.text, "책상 위에 컵이 있습니다.");
        assert!(answer.tts_url.is_some());
    }

    #[test]
    fn test_ask_error_is_boolean_with_message_in_answer() {
        let reply: AskReply =
            serde_json::from_str(r#"{"answer": "질문이 비어 있습니다.", "error": true}"#).unwrap();
        assert_eq!(reply.into_result().unwrap_err(), "질문이 비어 있습니다.");
    }

    #[test]
    fn test_voice_success_reply() {
        let reply: VoiceReply = serde_json::from_str(
            r#"{"question": "이게 뭐야?", "answer": "컵입니다.", "tts_url": null, "error": false}"#,
        )
        .unwrap();

        let voice = reply.into_result().unwrap();
        assert_eq!(voice.question, "이게 뭐야?");
        assert_eq!(voice.answer, "컵입니다.");
    }

    #[test]
    fn test_voice_error_reply() {
        let reply: VoiceReply =
            serde_json::from_str(r#"{"answer": "음성을 인식하지 못했습니다.", "error": true}"#)
                .unwrap();
        assert_eq!(
            reply.into_result().unwrap_err(),
            "음성을 인식하지 못했습니다."
        );
    }

    #[test]
    fn test_request_serialization() {
        let body = serde_json::to_value(AskRequest {
            question: "이게 뭐야?",
            image: "aGVsbG8=",
        })
        .unwrap();
        assert_eq!(body["question"], "이게 뭐야?");
        assert_eq!(body["image"], "aGVsbG8=");
    }
}
