//! Per-user conversation state

use serde::{Deserialize, Serialize};

/// Where in the conversation a user currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Session opened, prompt not yet answered
    New,
    /// Waiting for a search query
    Searching,
    /// Waiting for a search-result selection
    Sections,
    /// Waiting for a section selection
    Content,
    /// USSD leg done, SMS continuation in progress
    More,
}

/// Everything the worker persists between two messages of one user.
///
/// Stores serialize sessions with serde, so a round-trip through the store
/// must reproduce the record exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Current conversation state
    pub state: SessionState,
    /// The numbered options most recently shown to the user
    #[serde(default)]
    pub results: Vec<String>,
    /// Title of the article the user picked, once known
    #[serde(default)]
    pub page: Option<String>,
    /// Flattened section content still being delivered by SMS
    #[serde(default)]
    pub sms_content: String,
    /// Characters of `sms_content` already delivered
    #[serde(default)]
    pub sms_offset: usize,
    /// Canonical URL of the selected article
    #[serde(default)]
    pub fullurl: String,
}

impl Session {
    /// Fresh session at the start of the conversation.
    pub fn new() -> Self {
        Session {
            state: SessionState::New,
            results: Vec::new(),
            page: None,
            sms_content: String::new(),
            sms_offset: 0,
            fullurl: String::new(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_json() {
        let session = Session {
            state: SessionState::More,
            results: vec!["Cthulhu".to_string(), "Cthulhu Mythos".to_string()],
            page: Some("Cthulhu".to_string()),
            sms_content: "Cthulhu is a fictional cosmic entity".to_string(),
            sms_offset: 137,
            fullurl: "https://en.wikipedia.org/wiki/Cthulhu".to_string(),
        };
        let encoded = serde_json::to_string(&session).unwrap();
        let decoded: Session = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, session);
    }

    #[test]
    fn test_state_encodes_as_snake_case() {
        let encoded = serde_json::to_string(&SessionState::Sections).unwrap();
        assert_eq!(encoded, "\"sections\"");
    }

    #[test]
    fn test_missing_fields_default() {
        let decoded: Session = serde_json::from_str("{\"state\":\"new\"}").unwrap();
        assert_eq!(decoded, Session::new());
    }
}
