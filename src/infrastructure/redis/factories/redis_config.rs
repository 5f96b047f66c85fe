// src/infrastructure/redis/factories/redis_config.rs

use crate::errors::{CacheError, CacheResult};

pub struct RedisConfig {
    pub url: String,
    pub max_clients: usize,
}

impl RedisConfig {
    pub fn from_env() -> CacheResult<Self> {
        Ok(Self {
            url: std::env::var("LOCKING_CACHE_REDIS_URL")
                .map_err(|_| CacheError::store("LOCKING_CACHE_REDIS_URL must be set"))?,
            max_clients: std::env::var("LOCKING_CACHE_REDIS_MAX_CLIENTS")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .map_err(|_| CacheError::store("Invalid LOCKING_CACHE_REDIS_MAX_CLIENTS"))?,
        })
    }
}
