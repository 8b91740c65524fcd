use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Assistant,
    /// Error surfaces and other client-side notices
    System,
}

impl Speaker {
    /// Label shown in the chat log
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "나",
            Speaker::Assistant => "도우미",
            Speaker::System => "시스템",
        }
    }
}

/// One (speaker, text) entry of the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    pub speaker: Speaker,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_construction() {
        let entry = LogEntry::new(Speaker::User, "이게 뭐야?");
        assert_eq!(entry.speaker, Speaker::User);
        assert_eq!(entry.text, "이게 뭐야?");
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(Speaker::User.label(), "나");
        assert_eq!(Speaker::Assistant.label(), "도우미");
        assert_eq!(Speaker::System.label(), "시스템");
    }
}
