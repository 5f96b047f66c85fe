// src/domain/repositories/key_value_store_stub.rs

use crate::domain::repositories::KeyValueStore;
use crate::errors::{CacheError, CacheResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Entrée en mémoire : valeur + échéance d'expiration storage éventuelle.
#[derive(Debug, Clone)]
pub struct StubEntry {
    pub value: String,
    pub expires_at: Option<Instant>,
}

impl StubEntry {
    fn is_live(&self) -> bool {
        self.expires_at.is_none_or(|at| Instant::now() < at)
    }
}

/// Stub en mémoire du port `KeyValueStore`.
///
/// Chaque opération est atomique sous le mutex : le stub honore les mêmes
/// garanties d'atomicité que le store réel, ce qui permet de tester le
/// protocole de coordination sans infrastructure.
pub struct KeyValueStoreStub {
    pub storage: Mutex<HashMap<String, StubEntry>>,
    pub fail_all: bool,
}

impl Default for KeyValueStoreStub {
    fn default() -> Self {
        Self {
            storage: Mutex::new(HashMap::new()),
            fail_all: false,
        }
    }
}

impl KeyValueStoreStub {
    fn live_value(map: &HashMap<String, StubEntry>, key: &str) -> Option<String> {
        map.get(key).filter(|e| e.is_live()).map(|e| e.value.clone())
    }
}

#[async_trait]
impl KeyValueStore for KeyValueStoreStub {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        if self.fail_all {
            return Err(CacheError::store("Store down"));
        }
        let map = self.storage.lock().unwrap();
        Ok(Self::live_value(&map, key))
    }

    async fn mget(&self, keys: &[&str]) -> CacheResult<Vec<Option<String>>> {
        if self.fail_all {
            return Err(CacheError::store("Store down"));
        }
        let map = self.storage.lock().unwrap();
        Ok(keys.iter().map(|k| Self::live_value(&map, k)).collect())
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        if self.fail_all {
            return Err(CacheError::store("Store down"));
        }
        self.storage.lock().unwrap().insert(
            key.to_string(),
            StubEntry {
                value: value.to_string(),
                expires_at: ttl.map(|d| Instant::now() + d),
            },
        );
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool> {
        if self.fail_all {
            return Err(CacheError::store("Store down"));
        }
        // Check-and-insert sous le même verrou : atomique, comme SET NX.
        let mut map = self.storage.lock().unwrap();
        if Self::live_value(&map, key).is_some() {
            return Ok(false);
        }
        map.insert(
            key.to_string(),
            StubEntry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(true)
    }

    async fn compare_delete(&self, key: &str, expected: &str) -> CacheResult<bool> {
        if self.fail_all {
            return Err(CacheError::store("Store down"));
        }
        let mut map = self.storage.lock().unwrap();
        if Self::live_value(&map, key).as_deref() == Some(expected) {
            map.remove(key);
            return Ok(true);
        }
        Ok(false)
    }

    async fn flush_all(&self) -> CacheResult<()> {
        if self.fail_all {
            return Err(CacheError::store("Store down"));
        }
        self.storage.lock().unwrap().clear();
        Ok(())
    }
}
