//! Extract caching seam and the in-memory reference cache

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::StoreError;

/// Caches serialized article extracts by title.
///
/// Values are the `to_json` form of a parsed extract; keeping the cache on
/// strings lets implementations store them anywhere without knowing the
/// tree shape.
pub trait ExtractCache {
    /// The cached serialization for `title`, if still fresh.
    fn get(&mut self, title: &str) -> Result<Option<String>, StoreError>;

    /// Cache `extract_json` under `title`.
    fn put(&mut self, title: &str, extract_json: &str) -> Result<(), StoreError>;
}

/// Process-local extract cache with an optional freshness limit.
#[derive(Debug)]
pub struct InMemoryExtractCache {
    ttl: Option<Duration>,
    entries: HashMap<String, (Instant, String)>,
}

impl InMemoryExtractCache {
    /// How long cached article content stays valid.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    /// Cache with the default freshness limit.
    pub fn new() -> Self {
        Self::with_ttl(Some(Self::DEFAULT_TTL))
    }

    /// Cache with a custom freshness limit; `None` never expires.
    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        InMemoryExtractCache {
            ttl,
            entries: HashMap::new(),
        }
    }
}

impl Default for InMemoryExtractCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractCache for InMemoryExtractCache {
    fn get(&mut self, title: &str) -> Result<Option<String>, StoreError> {
        let expired = match self.entries.get(title) {
            Some((stored_at, _)) => self.ttl.is_some_and(|ttl| stored_at.elapsed() > ttl),
            None => false,
        };
        if expired {
            self.entries.remove(title);
        }
        Ok(self.entries.get(title).map(|(_, raw)| raw.clone()))
    }

    fn put(&mut self, title: &str, extract_json: &str) -> Result<(), StoreError> {
        self.entries
            .insert(title.to_string(), (Instant::now(), extract_json.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss() {
        let mut cache = InMemoryExtractCache::new();
        assert_eq!(cache.get("Cthulhu").unwrap(), None);
        cache.put("Cthulhu", "[{\"level\":null}]").unwrap();
        assert_eq!(
            cache.get("Cthulhu").unwrap().as_deref(),
            Some("[{\"level\":null}]")
        );
    }

    #[test]
    fn test_expiry() {
        let mut cache = InMemoryExtractCache::with_ttl(Some(Duration::ZERO));
        cache.put("Cthulhu", "[]").unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("Cthulhu").unwrap(), None);
    }
}
