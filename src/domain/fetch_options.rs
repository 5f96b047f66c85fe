// src/domain/fetch_options.rs

use std::time::Duration;

/// Réglages d'un appel à `fetch`, passés par valeur, tous surchargeables
/// indépendamment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchOptions {
    /// Fenêtre de fraîcheur logique : TTL storage du marqueur d'expiration.
    /// La valeur elle-même n'expire jamais côté storage.
    pub expires_in: Duration,

    /// Filet de sécurité : TTL storage du verrou si son détenteur crash ou
    /// bloque. Protège la vivacité, pas l'exclusion mutuelle.
    pub lock_timeout: Duration,

    /// Intervalle de polling du chemin froid en attendant le rafraîchisseur
    /// en cours.
    pub lock_wait: Duration,

    /// Attente totale maximale d'une valeur sur cache froid avant d'abandonner.
    pub cache_wait: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            expires_in: Duration::from_secs(1),
            lock_timeout: Duration::from_secs(1),
            lock_wait: Duration::from_millis(25),
            cache_wait: Duration::from_secs(1),
        }
    }
}

impl FetchOptions {
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = expires_in;
        self
    }

    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    pub fn with_lock_wait(mut self, lock_wait: Duration) -> Self {
        self.lock_wait = lock_wait;
        self
    }

    pub fn with_cache_wait(mut self, cache_wait: Duration) -> Self {
        self.cache_wait = cache_wait;
        self
    }
}
