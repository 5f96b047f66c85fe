// src/infrastructure/redis/factories/redis_context.rs

use std::sync::Arc;

use crate::application::LockingCache;
use crate::errors::{CacheError, CacheResult};
use crate::infrastructure::redis::factories::{RedisConfig, RedisContextBuilder};
use crate::infrastructure::redis::repositories::RedisKeyValueStore;

pub struct RedisContext {
    store: Arc<RedisKeyValueStore>,
    url: String,
    max_clients: usize,
}

impl RedisContext {
    pub fn builder() -> CacheResult<RedisContextBuilder> {
        RedisContextBuilder::new()
    }

    pub fn builder_raw() -> RedisContextBuilder {
        RedisContextBuilder::default()
    }

    pub fn store(&self) -> Arc<RedisKeyValueStore> {
        self.store.clone()
    }

    /// Cache prêt à l'emploi, branché sur ce contexte.
    pub fn cache(&self) -> LockingCache {
        LockingCache::new(self.store.clone())
    }

    pub fn url(&self) -> String {
        self.url.clone()
    }

    pub fn config(&self) -> RedisConfig {
        RedisConfig {
            url: self.url.clone(),
            max_clients: self.max_clients,
        }
    }

    pub(crate) async fn restore(builder: RedisContextBuilder) -> CacheResult<Self> {
        let store = RedisKeyValueStore::new(&builder.url, builder.max_clients)
            .await
            .map_err(|e| {
                CacheError::store(format!(
                    "Failed to connect to Redis at {}: {}",
                    builder.url, e
                ))
            })?;

        Ok(Self {
            store: Arc::new(store),
            url: builder.url,
            max_clients: builder.max_clients,
        })
    }
}
