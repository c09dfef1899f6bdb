//! In-process store used by the unit tests.
//!
//! Mimics the Redis replies the adapter depends on (nil on missing keys,
//! glob matching for KEYS and SCAN, lazy expiry) and can be told to fail a
//! given command with a transport error.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use redis::{ErrorKind, RedisError};

use crate::cache::{KeyValueStore, PONG};
use crate::error::Result;

/// Command to fail with an injected transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Set,
    Get,
    Keys,
    Exists,
    FlushAll,
    Scan,
    Ping,
    DelKey(String),
}

#[derive(Debug)]
struct Stored {
    value: Vec<u8>,
    expire: Option<Duration>,
    deadline: Option<Instant>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, Stored>,
    failure: Option<Failure>,
    pings: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, failure: Failure) {
        self.lock().failure = Some(failure);
    }

    pub fn contains(&self, key: &str) -> bool {
        let mut inner = self.lock();
        purge_expired(&mut inner);
        inner.entries.contains_key(key)
    }

    /// Expiration the key was last written with.
    pub fn expire_of(&self, key: &str) -> Option<Duration> {
        self.lock().entries.get(key).and_then(|stored| stored.expire)
    }

    /// Number of PING commands answered so far.
    pub fn pings(&self) -> u64 {
        self.lock().pings
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    fn live(&self, failure: Failure) -> Result<MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        if inner.failure.as_ref() == Some(&failure) {
            return Err(injected().into());
        }
        purge_expired(&mut inner);
        Ok(inner)
    }
}

fn injected() -> RedisError {
    RedisError::from((ErrorKind::IoError, "injected failure"))
}

fn purge_expired(inner: &mut Inner) {
    let now = Instant::now();
    inner
        .entries
        .retain(|_, stored| stored.deadline.map_or(true, |deadline| deadline > now));
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &[u8], expire: Option<Duration>) -> Result<()> {
        let mut inner = self.live(Failure::Set)?;
        inner.entries.insert(
            key.to_string(),
            Stored {
                value: value.to_vec(),
                expire,
                deadline: expire.map(|expire| Instant::now() + expire),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let inner = self.live(Failure::Get)?;
        Ok(inner.entries.get(key).map(|stored| stored.value.clone()))
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let inner = self.live(Failure::Keys)?;
        Ok(inner
            .entries
            .keys()
            .filter(|key| glob_match(pattern.as_bytes(), key.as_bytes()))
            .cloned()
            .collect())
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut inner = self.live(Failure::DelKey(key.to_string()))?;
        Ok(inner.entries.remove(key).map_or(0, |_| 1))
    }

    async fn exists(&self, key: &str) -> Result<u64> {
        let inner = self.live(Failure::Exists)?;
        Ok(u64::from(inner.entries.contains_key(key)))
    }

    async fn flush_all(&self) -> Result<()> {
        self.live(Failure::FlushAll)?.entries.clear();
        Ok(())
    }

    async fn ping(&self) -> Result<String> {
        let mut inner = self.live(Failure::Ping)?;
        inner.pings += 1;
        Ok(PONG.to_string())
    }

    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<(u64, Vec<String>)> {
        let inner = self.live(Failure::Scan)?;
        let matching: Vec<&String> = inner
            .entries
            .keys()
            .filter(|key| glob_match(pattern.as_bytes(), key.as_bytes()))
            .collect();

        let start = (cursor as usize).min(matching.len());
        let end = (start + count).min(matching.len());
        let page = matching[start..end].iter().map(|key| key.to_string()).collect();
        let next = if end >= matching.len() { 0 } else { end as u64 };
        Ok((next, page))
    }
}

/// Redis-style glob: `*`, `?`, `[abc]`, `[a-z]`, `[^a]` and `\` escapes.
pub fn glob_match(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.first() {
        None => text.is_empty(),
        Some(b'*') => {
            let rest = &pattern[1..];
            (0..=text.len()).any(|skip| glob_match(rest, &text[skip..]))
        }
        Some(b'?') => !text.is_empty() && glob_match(&pattern[1..], &text[1..]),
        Some(b'[') => match (text.first(), class_end(pattern)) {
            (Some(&c), Some(end)) => {
                class_matches(&pattern[1..end], c) && glob_match(&pattern[end + 1..], &text[1..])
            }
            (Some(&c), None) => c == b'[' && glob_match(&pattern[1..], &text[1..]),
            (None, _) => false,
        },
        Some(b'\\') if pattern.len() > 1 => {
            text.first() == Some(&pattern[1]) && glob_match(&pattern[2..], &text[1..])
        }
        Some(&p) => text.first() == Some(&p) && glob_match(&pattern[1..], &text[1..]),
    }
}

fn class_end(pattern: &[u8]) -> Option<usize> {
    let mut i = 1;
    while i < pattern.len() {
        match pattern[i] {
            b'\\' => i += 2,
            b']' if i > 1 => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn class_matches(class: &[u8], c: u8) -> bool {
    let (negate, class) = match class.first() {
        Some(b'^') => (true, &class[1..]),
        _ => (false, class),
    };

    let mut matched = false;
    let mut i = 0;
    while i < class.len() {
        if class[i] == b'\\' && i + 1 < class.len() {
            matched |= class[i + 1] == c;
            i += 2;
        } else if i + 2 < class.len() && class[i + 1] == b'-' {
            let (lo, hi) = (class[i].min(class[i + 2]), class[i].max(class[i + 2]));
            matched |= (lo..=hi).contains(&c);
            i += 3;
        } else {
            matched |= class[i] == c;
            i += 1;
        }
    }
    matched != negate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match(b"*", b""));
        assert!(glob_match(b"*", b"anything"));
        assert!(glob_match(b"user:*", b"user:42"));
        assert!(!glob_match(b"user:*", b"session:42"));
        assert!(glob_match(b"h?llo", b"hello"));
        assert!(!glob_match(b"h?llo", b"hllo"));
        assert!(glob_match(b"h[ae]llo", b"hallo"));
        assert!(!glob_match(b"h[ae]llo", b"hillo"));
        assert!(glob_match(b"h[^e]llo", b"hallo"));
        assert!(!glob_match(b"h[^e]llo", b"hello"));
        assert!(glob_match(b"h[a-b]llo", b"hbllo"));
        assert!(glob_match(b"a\\*b", b"a*b"));
        assert!(!glob_match(b"a\\*b", b"axb"));
        assert!(glob_match(b"exact", b"exact"));
        assert!(!glob_match(b"exact", b"exactly"));
    }
}
