//! Session persistence seam and the in-memory reference store

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::StoreError;
use crate::session::Session;

/// Keeps one session per user address between messages.
///
/// Implementations persist the serde form of the session; whatever comes
/// back from `load` must equal what `save` was given.
pub trait SessionStore {
    /// The stored session for `user_id`, if one is live.
    fn load(&mut self, user_id: &str) -> Result<Option<Session>, StoreError>;

    /// Persist `session` under `user_id`, replacing any previous one.
    fn save(&mut self, user_id: &str, session: &Session) -> Result<(), StoreError>;

    /// Drop the session for `user_id`, if any.
    fn clear(&mut self, user_id: &str) -> Result<(), StoreError>;
}

/// Process-local session store with an optional idle expiry.
///
/// Sessions are held as serialized JSON so the round-trip behaves the same
/// as it would against an external store.
#[derive(Debug)]
pub struct InMemorySessionStore {
    ttl: Option<Duration>,
    entries: HashMap<String, (Instant, String)>,
}

impl InMemorySessionStore {
    /// How long a USSD session is kept without activity.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(180);

    /// Store with the default session expiry.
    pub fn new() -> Self {
        Self::with_ttl(Some(Self::DEFAULT_TTL))
    }

    /// Store with a custom expiry; `None` keeps sessions forever.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        InMemorySessionStore {
            ttl,
            entries: HashMap::new(),
        }
    }

    fn drop_if_expired(&mut self, user_id: &str) {
        let expired = match self.entries.get(user_id) {
            Some((stored_at, _)) => self.ttl.is_some_and(|ttl| stored_at.elapsed() > ttl),
            None => false,
        };
        if expired {
            self.entries.remove(user_id);
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&mut self, user_id: &str) -> Result<Option<Session>, StoreError> {
        self.drop_if_expired(user_id);
        match self.entries.get(user_id) {
            Some((_, raw)) => {
                let session =
                    serde_json::from_str(raw).map_err(|err| StoreError(err.to_string()))?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, user_id: &str, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session).map_err(|err| StoreError(err.to_string()))?;
        self.entries.insert(user_id.to_string(), (Instant::now(), raw));
        Ok(())
    }

    fn clear(&mut self, user_id: &str) -> Result<(), StoreError> {
        self.entries.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;

    #[test]
    fn test_round_trip() {
        let mut store = InMemorySessionStore::new();
        let mut session = Session::new();
        session.state = SessionState::Sections;
        session.results = vec!["a".to_string(), "b".to_string()];

        store.save("+100", &session).unwrap();
        assert_eq!(store.load("+100").unwrap(), Some(session));
        assert_eq!(store.load("+200").unwrap(), None);
    }

    #[test]
    fn test_clear() {
        let mut store = InMemorySessionStore::new();
        store.save("+100", &Session::new()).unwrap();
        store.clear("+100").unwrap();
        assert_eq!(store.load("+100").unwrap(), None);
        store.clear("+100").unwrap();
    }

    #[test]
    fn test_expiry() {
        let mut store = InMemorySessionStore::with_ttl(Some(Duration::ZERO));
        store.save("+100", &Session::new()).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.load("+100").unwrap(), None);
    }

    #[test]
    fn test_no_expiry_when_disabled() {
        let mut store = InMemorySessionStore::with_ttl(None);
        store.save("+100", &Session::new()).unwrap();
        assert!(store.load("+100").unwrap().is_some());
    }
}
