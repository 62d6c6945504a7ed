use chrono::Utc;
use dashmap::DashMap;

/// Tokens revoked before their natural expiry, keyed by the raw token.
/// Entries carry the token's own `exp` so they can be dropped once the
/// token would have been rejected anyway.
#[derive(Debug, Default)]
pub struct RevocationList {
    entries: DashMap<String, usize>,
}

impl RevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the token was already revoked. The check and
    /// the insert happen under one shard lock, so exactly one caller wins.
    pub fn revoke(&self, token: &str, expires_at: usize) -> bool {
        self.entries.insert(token.to_string(), expires_at).is_none()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Drops entries whose token has expired. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now().timestamp().max(0) as usize;
        let before = self.entries.len();
        self.entries.retain(|_, exp| *exp > now);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
