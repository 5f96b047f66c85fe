// src/errors/result.rs

use crate::errors::CacheError;

/// RESULT DU CACHE
/// Utilisé par : le port `KeyValueStore`, le `LockManager`, l'orchestrateur `fetch`
/// et les producteurs fournis par l'appelant.
pub type CacheResult<T> = std::result::Result<T, CacheError>;
