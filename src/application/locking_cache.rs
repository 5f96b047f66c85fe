// src/application/locking_cache.rs

//! # LockingCache — cache read-through protégé contre le "Thundering Herd"
//!
//! Quand une valeur cachée expire, une recomputation naïve laisse tous les
//! appelants concurrents refaire le travail coûteux en même temps. Ici, au
//! plus UN appelant recalcule à la fois ; les autres attendent brièvement la
//! valeur fraîche (cache froid) ou sont servis avec la valeur périmée (cache
//! périmé).
//!
//! ### Modèle de données (entièrement dans le store, rien en mémoire)
//! - **Entrée** (`<key>`) : la valeur, SANS expiration storage — une valeur
//!   périmée reste toujours servable, même longtemps après son expiration
//!   logique.
//! - **Marqueur** (`<key>:expiry`) : sentinelle avec TTL = `expires_in` ;
//!   sa présence signifie "l'entrée est fraîche", seule sa présence compte.
//! - **Verrou** (`<key>:lock`) : jeton aléatoire avec TTL = `lock_timeout`,
//!   géré par le [`LockManager`].
//!
//! ### Asymétrie d'erreurs, voulue
//! Un cache froid n'a aucune valeur de secours : les erreurs du producteur
//! remontent. Un cache périmé a une valeur parfaitement utilisable quoique
//! vieille : un échec transitoire du producteur dégrade gracieusement au lieu
//! de faire échouer chaque appelant.

use crate::application::lock_manager::{LockManager, LockToken};
use crate::domain::keys;
use crate::domain::repositories::KeyValueStore;
use crate::domain::FetchOptions;
use crate::errors::CacheResult;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

/// Valeur du marqueur de fraîcheur : seule sa présence compte.
const FRESH_SENTINEL: &str = "1";

pub struct LockingCache {
    store: Arc<dyn KeyValueStore>,
    locks: LockManager,
}

impl LockingCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let locks = LockManager::new(store.clone());
        Self { store, locks }
    }

    /// Lit `key`, en déléguant le recalcul à `producer` si nécessaire.
    ///
    /// - **Frais** (entrée + marqueur présents) : retourne la valeur lue,
    ///   sans toucher au verrou.
    /// - **Périmé** (entrée présente, marqueur expiré) : UNE tentative non
    ///   bloquante de devenir le rafraîchisseur ; sinon la valeur périmée
    ///   est servie immédiatement, sans attente ni polling.
    /// - **Froid** (entrée absente) : boucle bornée par `cache_wait`, polling
    ///   toutes les `lock_wait` ; `Ok(None)` si aucune valeur n'apparaît
    ///   avant l'échéance (résultat explicite, pas une erreur).
    ///
    /// Le producteur est invoqué au plus une fois par appel, uniquement sous
    /// verrou détenu.
    pub async fn fetch<F, Fut>(
        &self,
        key: &str,
        opts: FetchOptions,
        producer: F,
    ) -> CacheResult<Option<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CacheResult<String>>,
    {
        let expiry_key = keys::expiry_key(key);

        // Lecture appariée valeur + marqueur, en un seul aller-retour.
        let pair = self.store.mget(&[key, &expiry_key]).await?;
        let cached = pair.first().cloned().flatten();
        let marker = pair.get(1).cloned().flatten();

        match (cached, marker) {
            (Some(value), Some(_)) => Ok(Some(value)),
            (Some(stale), None) => self.refresh_stale(key, opts, stale, producer).await,
            // Entrée absente : un marqueur orphelin n'a aucun sens, on l'ignore.
            (None, _) => self.fill_cold(key, opts, producer).await,
        }
    }

    /// Vide le store. Usage administratif et tests uniquement.
    pub async fn flush_all(&self) -> CacheResult<()> {
        self.store.flush_all().await
    }

    /// Chemin périmé : une seule tentative, jamais bloquante.
    async fn refresh_stale<F, Fut>(
        &self,
        key: &str,
        opts: FetchOptions,
        stale: String,
        producer: F,
    ) -> CacheResult<Option<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CacheResult<String>>,
    {
        let Some(token) = self.locks.acquire(key, opts.lock_timeout).await? else {
            // Un autre appelant rafraîchit déjà : on sert le périmé tel quel.
            return Ok(Some(stale));
        };

        match self.refresh_under_lock(key, &token, producer(), opts).await {
            Ok(value) => Ok(Some(value)),
            Err(refresh_err) if refresh_err.is_producer() => {
                // Le périmé reste servable : l'échec du producteur est avalé,
                // jamais remonté par ce chemin.
                tracing::warn!(
                    "Refresh failed for '{}', serving stale value: {}",
                    key,
                    refresh_err
                );
                Ok(Some(stale))
            }
            // Erreur store : le protocole ne peut pas avancer, elle remonte.
            Err(store_err) => Err(store_err),
        }
    }

    /// Chemin froid : boucle bornée par `cache_wait`.
    async fn fill_cold<F, Fut>(
        &self,
        key: &str,
        opts: FetchOptions,
        producer: F,
    ) -> CacheResult<Option<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CacheResult<String>>,
    {
        let deadline = Instant::now() + opts.cache_wait;
        let mut producer = Some(producer);

        while Instant::now() < deadline {
            // Un rafraîchisseur concurrent vient peut-être de terminer.
            if let Some(value) = self.store.get(key).await? {
                return Ok(Some(value));
            }

            if let Some(token) = self.locks.acquire(key, opts.lock_timeout).await? {
                // `producer` n'est consommé qu'ici ; toutes les branches
                // retournent ensuite, la boucle ne le redemande jamais.
                if let Some(run) = producer.take() {
                    // Rafraîchisseur unique : les erreurs du producteur
                    // remontent telles quelles, rien à servir en secours.
                    let value = self.refresh_under_lock(key, &token, run(), opts).await?;
                    return Ok(Some(value));
                }
            }

            tokio::time::sleep(opts.lock_wait).await;
        }

        // Échéance atteinte sans valeur : "pas de valeur disponible",
        // résultat explicite et non une erreur.
        Ok(None)
    }

    /// Exécute le recalcul sous verrou détenu, écrit le résultat, et relâche
    /// TOUJOURS le verrou — succès, échec du producteur ou échec d'écriture.
    async fn refresh_under_lock<Fut>(
        &self,
        key: &str,
        token: &LockToken,
        producing: Fut,
        opts: FetchOptions,
    ) -> CacheResult<String>
    where
        Fut: Future<Output = CacheResult<String>>,
    {
        let outcome = match producing.await {
            Ok(value) => self.write_back(key, &value, opts).await.map(|()| value),
            Err(cause) => Err(cause),
        };

        let released = self.locks.release(key, token).await;

        match outcome {
            Ok(value) => {
                released?;
                Ok(value)
            }
            Err(primary) => {
                if let Err(release_err) = released {
                    // L'erreur primaire prime ; le TTL du verrou fera le
                    // ménage si le release a échoué.
                    tracing::warn!("Failed to release lock for '{}': {}", key, release_err);
                }
                Err(primary)
            }
        }
    }

    /// Écrit la valeur SANS expiration storage, puis le marqueur avec TTL.
    ///
    /// Le marqueur suit toujours la valeur : la fenêtre de paire déchirée se
    /// limite à l'intervalle entre les deux écritures, que le protocole
    /// tolère.
    async fn write_back(&self, key: &str, value: &str, opts: FetchOptions) -> CacheResult<()> {
        self.store.set(key, value, None).await?;
        self.store
            .set(&keys::expiry_key(key), FRESH_SENTINEL, Some(opts.expires_in))
            .await
    }
}
