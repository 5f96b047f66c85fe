// src/domain/repositories/key_value_store.rs

use crate::errors::CacheResult;
use async_trait::async_trait;
use std::time::Duration;

/// Port vers le key-value store distant — l'unique surface de dépendance du
/// coeur. Toute coordination entre appelants passe par les garanties
/// d'atomicité du store, jamais par la mémoire du processus.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Lecture batchée : même sémantique que des GET indépendants, en un seul
    /// aller-retour.
    async fn mget(&self, keys: &[&str]) -> CacheResult<Vec<Option<String>>>;

    /// Écrase sans condition. `ttl: None` = aucune expiration côté storage
    /// (la clé survit jusqu'à être réécrite ou supprimée).
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()>;

    /// Création atomique si aucune clé vivante n'existe, avec expiration.
    /// `Ok(true)` si la clé a été posée par CET appel.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<bool>;

    /// Suppression atomique si la valeur courante vaut `expected`.
    /// DOIT être une seule opération indivisible côté serveur : un
    /// read-then-delete côté client réintroduit la course que cette
    /// primitive existe pour fermer.
    async fn compare_delete(&self, key: &str, expected: &str) -> CacheResult<bool>;

    /// Vide le store. Usage administratif et tests uniquement.
    async fn flush_all(&self) -> CacheResult<()>;
}
