use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

/// In-memory copy of every guild's custom prefix.
///
/// Warmed from the database at startup and updated by `setprefix`, so message
/// routing never queries the database.
#[derive(Clone, Default)]
pub struct PrefixCache {
    prefixes: Arc<RwLock<HashMap<u64, String>>>,
}

impl PrefixCache {
    pub fn new(entries: impl IntoIterator<Item = (u64, String)>) -> Self {
        Self {
            prefixes: Arc::new(RwLock::new(entries.into_iter().collect())),
        }
    }

    pub async fn get(&self, guild_id: u64) -> Option<String> {
        self.prefixes.read().await.get(&guild_id).cloned()
    }

    pub async fn set(&self, guild_id: u64, prefix: &str) {
        self.prefixes
            .write()
            .await
            .insert(guild_id, prefix.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overrides_warmed_entries() {
        let cache = PrefixCache::new([(1, "!".to_owned())]);
        assert_eq!(cache.get(1).await.as_deref(), Some("!"));
        assert_eq!(cache.get(2).await, None);

        cache.set(1, "?").await;
        assert_eq!(cache.get(1).await.as_deref(), Some("?"));
    }
}
