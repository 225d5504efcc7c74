use serde_json::Value;

pub const DEFAULT_BOOKMAKERS_LIMIT: usize = 5;

/// Allow-list plus cap applied to the `bookmakers` array of each game.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmakerFilter {
    allow: Option<Vec<String>>,
    limit: usize,
}

impl Default for BookmakerFilter {
    fn default() -> Self {
        Self {
            allow: None,
            limit: DEFAULT_BOOKMAKERS_LIMIT,
        }
    }
}

impl BookmakerFilter {
    /// `limit` of 0 disables the cap. An empty allow list is treated as no list.
    pub fn new(allow: Option<Vec<String>>, limit: usize) -> Self {
        let allow = allow
            .map(|keys| {
                keys.iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|keys| !keys.is_empty());
        Self { allow, limit }
    }

    /// Keep allow-listed entries (by `key`, case-insensitive), then cap the length.
    pub fn apply(&self, bookmakers: Vec<Value>) -> Vec<Value> {
        let mut kept: Vec<Value> = match &self.allow {
            Some(allow) => bookmakers
                .into_iter()
                .filter(|bm| {
                    bm.get("key")
                        .and_then(Value::as_str)
                        .map(|k| allow.contains(&k.to_lowercase()))
                        .unwrap_or(false)
                })
                .collect(),
            None => bookmakers,
        };
        if self.allow.is_some() {
            tracing::debug!(kept = kept.len(), "filtered bookmakers by allow list");
        }
        if self.limit > 0 {
            kept.truncate(self.limit);
        }
        kept
    }

    /// Apply to one event object in place. Objects without a `bookmakers` array are left alone.
    pub fn apply_to_event(&self, event: &mut Value) {
        if let Some(obj) = event.as_object_mut() {
            if let Some(Value::Array(list)) = obj.get_mut("bookmakers") {
                let taken = std::mem::take(list);
                *list = self.apply(taken);
            }
        }
    }

    /// Apply to every game of an odds payload (an array of events), or to the
    /// payload itself when it is a single event.
    pub fn apply_to_games(&self, payload: &mut Value) {
        match payload {
            Value::Array(games) => games.iter_mut().for_each(|g| self.apply_to_event(g)),
            Value::Object(_) => self.apply_to_event(payload),
            _ => {}
        }
    }
}
