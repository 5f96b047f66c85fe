// src/errors/cache_error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Échec du store distant (réseau, timeout, protocole).
    /// Jamais avalée par le coeur : le protocole ne peut pas avancer sans le store.
    #[error("Store failure: {0}")]
    Store(String),

    /// Échec du calcul fourni par l'appelant.
    /// Remonte sur cache froid, avalée sur cache périmé (valeur de secours disponible).
    #[error("Producer failure: {0}")]
    Producer(String),
}

impl CacheError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer(message.into())
    }

    /// Utilisé par le chemin périmé pour décider avaler / remonter.
    pub fn is_producer(&self) -> bool {
        matches!(self, Self::Producer(_))
    }
}

// Pour transformer les erreurs du client Redis (fred) en CacheError
#[cfg(feature = "redis")]
impl From<fred::error::Error> for CacheError {
    fn from(err: fred::error::Error) -> Self {
        // En interne, on log l'erreur réelle pour le debugging
        tracing::error!("Redis infrastructure error: {:?}", err);

        Self::Store(err.to_string())
    }
}
