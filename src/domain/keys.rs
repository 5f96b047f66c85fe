// src/domain/keys.rs

//! Dérivation des clés compagnes d'une clé de cache.
//!
//! Fonction pure, stable entre redémarrages (aucun sel par processus) :
//! chaque appelant, quel que soit le processus ou la machine, doit dériver
//! exactement les mêmes clés pour coordonner ses accès.
//!
//! Les clés de base se terminant par un suffixe réservé ne sont pas
//! supportées : elles entreraient en collision avec les clés dérivées
//! d'une autre clé.

/// Suffixe réservé de la clé de verrou.
pub const LOCK_SUFFIX: &str = ":lock";

/// Suffixe réservé du marqueur de fraîcheur.
pub const EXPIRY_SUFFIX: &str = ":expiry";

/// Clé du verrou d'exclusion mutuelle associé à `key`.
pub fn lock_key(key: &str) -> String {
    format!("{key}{LOCK_SUFFIX}")
}

/// Clé du marqueur de fraîcheur associé à `key`.
pub fn expiry_key(key: &str) -> String {
    format!("{key}{EXPIRY_SUFFIX}")
}
