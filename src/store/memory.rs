use crate::store::KeyValueStore;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Clone)]
pub struct InMemoryTtlStore<V> {
    inner: Arc<RwLock<HashMap<String, (Instant, V)>>>,
}

impl<V> InMemoryTtlStore<V> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl<V> Default for InMemoryTtlStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<V> KeyValueStore<V> for InMemoryTtlStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Result<Option<V>> {
        let read = self.inner.read().await;
        Ok(match read.get(key) {
            Some((expires_at, value)) if Instant::now() < *expires_at => Some(value.clone()),
            _ => None,
        })
    }

    async fn put(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let mut write = self.inner.write().await;
        write.insert(key.to_string(), (Instant::now() + ttl, value));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut write = self.inner.write().await;
        Ok(matches!(write.remove(key), Some((expires_at, _)) if Instant::now() < expires_at))
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = Instant::now();
        let mut write = self.inner.write().await;
        let before = write.len();
        write.retain(|_, (expires_at, _)| now < *expires_at);
        Ok(before - write.len())
    }
}
