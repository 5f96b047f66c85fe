// src/application/lock_manager.rs

use crate::domain::keys;
use crate::domain::repositories::KeyValueStore;
use crate::errors::CacheResult;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Jeton d'acquisition : identifie UNE tentative, jamais réutilisé.
///
/// Un jeton frais est généré à chaque acquisition, y compris pour deux
/// tentatives successives du même appelant : `release` peut ainsi distinguer
/// un verrou repris après expiration TTL d'un verrou encore détenu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockToken(String);

impl LockToken {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Verrou d'exclusion mutuelle distribué, borné par TTL.
///
/// Aucun état local entre les appels : la propriété du verrou n'existe que
/// dans le store, établie par le jeton. Le TTL (`lock_timeout`) est un filet
/// anti-deadlock si le détenteur crash ou bloque — il protège la vivacité,
/// jamais l'exclusion mutuelle.
pub struct LockManager {
    store: Arc<dyn KeyValueStore>,
}

impl LockManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Tente de poser le verrou de `key` avec un jeton frais et un TTL de
    /// `timeout`. `Ok(None)` si un verrou vivant existe déjà : c'est une
    /// branche normale du protocole, pas une erreur.
    pub async fn acquire(&self, key: &str, timeout: Duration) -> CacheResult<Option<LockToken>> {
        let token = LockToken::generate();
        let accepted = self
            .store
            .set_if_absent(&keys::lock_key(key), token.as_str(), timeout)
            .await?;

        Ok(accepted.then_some(token))
    }

    /// Relâche le verrou de `key` seulement si sa valeur courante vaut encore
    /// `token` (compare-and-delete atomique côté serveur).
    ///
    /// `Ok(false)` : le verrou a expiré puis a été repris par un autre
    /// détenteur — no-op, son verrou à lui reste intact.
    pub async fn release(&self, key: &str, token: &LockToken) -> CacheResult<bool> {
        self.store
            .compare_delete(&keys::lock_key(key), token.as_str())
            .await
    }
}
