// src/infrastructure/redis/factories/redis_context_builder.rs

use crate::errors::CacheResult;
use crate::infrastructure::redis::factories::{RedisConfig, RedisContext};

pub struct RedisContextBuilder {
    pub(crate) url: String,
    pub(crate) max_clients: usize,
}

impl Default for RedisContextBuilder {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_clients: 16,
        }
    }
}

impl RedisContextBuilder {
    pub fn new() -> CacheResult<Self> {
        let config = RedisConfig::from_env()?;

        Ok(Self {
            url: config.url,
            max_clients: config.max_clients,
        })
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.max_clients = max;
        self
    }

    pub async fn build(self) -> CacheResult<RedisContext> {
        RedisContext::restore(self).await
    }
}
