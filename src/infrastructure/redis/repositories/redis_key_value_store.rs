// src/infrastructure/redis/repositories/redis_key_value_store.rs

use async_trait::async_trait;
use fred::clients::Pool;
use fred::prelude::*;
use fred::types::{Builder, Expiration, SetOptions};
use std::time::Duration;

use crate::domain::repositories::KeyValueStore;
use crate::errors::{CacheError, CacheResult};

/// Script exécuté côté serveur : GET + DEL en une seule opération indivisible.
/// Un read-then-delete côté client réintroduirait la course que ce script
/// ferme : le verrou de A expire, B acquiert, le release tardif de A
/// supprimerait le verrou de B.
const COMPARE_DELETE_SCRIPT: &str = r#"
if redis.call('get', KEYS[1]) == ARGV[1] then
  return redis.call('del', KEYS[1])
else
  return 0
end
"#;

/// Adaptateur Redis du port `KeyValueStore`.
///
/// Cible une instance Redis unique (ou un proxy linéarisable) : `SET NX` et
/// le script de compare-delete y sont atomiques. Un déploiement répliqué avec
/// failover asynchrone affaiblit ces garanties (quorum type Redlock hors
/// périmètre).
pub struct RedisKeyValueStore {
    pool: Pool,
}

impl RedisKeyValueStore {
    pub async fn new(redis_url: &str, max_clients: usize) -> CacheResult<Self> {
        let config = Config::from_url(redis_url)
            .map_err(|e| CacheError::store(format!("Invalid Redis URL: {}", e)))?;

        let pool = Builder::from_config(config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = Duration::from_secs(5);
                cfg.internal_command_timeout = Duration::from_secs(5);
                cfg.max_command_attempts = 5;
            })
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 1000, 2))
            .build_pool(max_clients)
            .map_err(|e| CacheError::store(e.to_string()))?;

        pool.init().await?;

        // On attend que TOUS les clients du pool soient connectés
        pool.wait_for_connect().await?;

        Ok(Self { pool })
    }

    fn map_expiration(ttl: Duration) -> Expiration {
        if ttl < Duration::from_secs(1) {
            Expiration::PX(ttl.as_millis() as i64)
        } else {
            Expiration::EX(ttl.as_secs() as i64)
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let result: Option<String> = self.pool.get(key).await?;

        Ok(result)
    }

    async fn mget(&self, keys: &[&str]) -> CacheResult<Vec<Option<String>>> {
        let keys: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        let result: Vec<Option<String>> = self.pool.mget(keys).await?;

        Ok(result)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        self.pool
            .set::<(), _, _>(key, value, ttl.map(Self::map_expiration), None, false)
            .await?;

        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool> {
        // SET NX : la réponse est nil si une clé vivante existait déjà.
        let reply: Option<String> = self
            .pool
            .set(
                key,
                value,
                Some(Self::map_expiration(ttl)),
                Some(SetOptions::NX),
                false,
            )
            .await?;

        Ok(reply.is_some())
    }

    async fn compare_delete(&self, key: &str, expected: &str) -> CacheResult<bool> {
        let deleted: i64 = self
            .pool
            .next()
            .eval(COMPARE_DELETE_SCRIPT, vec![key], vec![expected])
            .await?;

        Ok(deleted > 0)
    }

    async fn flush_all(&self) -> CacheResult<()> {
        self.pool.next().flushall::<()>(false).await?;

        Ok(())
    }
}
