use crate::Seat;
use crate::Timestamp;
use serde::Serialize;

/// One line of the session chat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub timestamp: Timestamp,
    pub client_index: Seat,
    pub nickname: String,
    pub content: String,
}

impl ChatMessage {
    /// None when nothing is left after trimming.
    pub fn new(client_index: Seat, nickname: &str, content: &str) -> Option<Self> {
        Some(content.trim())
            .filter(|s| !s.is_empty())
            .map(|content| Self {
                timestamp: crate::now(),
                client_index,
                nickname: nickname.to_string(),
                content: content.to_string(),
            })
    }
}

impl std::fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.nickname, self.content)
    }
}
