use anyhow::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Round-robin over a fixed list of API keys, so repeated calls spread
/// quota usage evenly across every configured key in call order.
#[derive(Debug)]
pub struct KeyRing {
    keys: Vec<String>,
    cursor: AtomicUsize,
}

impl KeyRing {
    pub fn new<I, S>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            anyhow::bail!("at least one odds API key is required");
        }
        if keys.len() > 1 {
            tracing::info!(keys = keys.len(), "round-robin mode enabled");
        }
        Ok(Self {
            keys,
            cursor: AtomicUsize::new(0),
        })
    }

    /// The key for the next outbound call. Wraps to the first key after the last.
    pub fn next_key(&self) -> &str {
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        if self.keys.len() > 1 {
            tracing::debug!(key = idx + 1, of = self.keys.len(), "using API key");
        }
        &self.keys[idx]
    }
}
