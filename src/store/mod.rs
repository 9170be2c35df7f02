use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

pub mod memory;

/// Key-value store whose entries disappear once their TTL lapses.
#[async_trait::async_trait]
pub trait KeyValueStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<V>>;

    async fn put(&self, key: &str, value: V, ttl: Duration) -> Result<()>;

    /// Returns whether a live entry was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Drops expired entries, returning how many went.
    async fn purge_expired(&self) -> Result<usize>;
}

pub fn spawn_sweeper<V>(store: Arc<dyn KeyValueStore<V>>, every: Duration) -> tokio::task::JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(n) => tracing::debug!(purged = n, "expired store entries removed"),
                Err(e) => tracing::warn!(error = %e, "store sweep failed"),
            }
        }
    })
}
