//! Inbound message model
//!
//! The transport hands the worker a minimal view of each inbound message:
//! who sent it, its text if any, and the session event the gateway attached.
//! Gateways that do not report session events leave the event unset and the
//! worker infers it from the presence of content.

/// Session lifecycle event attached to an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user opened a new session
    New,
    /// The user continued an existing session
    Resume,
    /// The session was torn down by the user or the network
    Close,
}

/// One inbound message as seen by the worker.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    /// Address of the sender, also the session key
    pub from_addr: String,
    /// Message text; absent for bare session-open events
    pub content: Option<String>,
    /// Session event reported by the gateway, if any
    pub event: Option<SessionEvent>,
}

impl InboundMessage {
    /// Message with inferred session semantics: no content means a fresh
    /// session, anything else continues one.
    pub fn new(from_addr: impl Into<String>, content: Option<String>) -> Self {
        InboundMessage {
            from_addr: from_addr.into(),
            content,
            event: None,
        }
    }

    /// Message carrying an explicit session event.
    pub fn with_event(mut self, event: SessionEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// The event to act on, inferring one when the gateway sent none.
    pub fn effective_event(&self) -> SessionEvent {
        match self.event {
            Some(event) => event,
            None if self.content.is_none() => SessionEvent::New,
            None => SessionEvent::Resume,
        }
    }

    /// Message text with surrounding whitespace removed, empty if absent.
    pub fn trimmed_content(&self) -> &str {
        self.content.as_deref().unwrap_or("").trim()
    }
}
