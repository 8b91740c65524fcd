use super::types::{LogEntry, Speaker};
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only conversation history shared between UI and orchestrator
///
/// Entries are never mutated or removed after append.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Arc<RwLock<Vec<LogEntry>>>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, speaker: Speaker, text: impl Into<String>) {
        self.entries.write().push(LogEntry::new(speaker, text));
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let log = ConversationLog::new();
        log.append(Speaker::User, "first");
        log.append(Speaker::Assistant, "second");
        log.append(Speaker::System, "third");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].text, "first");
        assert_eq!(entries[1].text, "second");
        assert_eq!(entries[2].text, "third");
    }

    #[test]
    fn test_clones_share_entries() {
        let log = ConversationLog::new();
        let view = log.clone();
        log.append(Speaker::User, "hello");
        assert_eq!(view.len(), 1);
    }
}
