// src/infrastructure/redis/utils/redis_test_context.rs

use std::sync::Arc;

use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::Redis as RedisImage;

use crate::application::LockingCache;
use crate::infrastructure::redis::factories::RedisContext;
use crate::infrastructure::redis::repositories::RedisKeyValueStore;
use crate::infrastructure::redis::utils::RedisTestContextBuilder;

pub struct RedisTestContext {
    context: RedisContext,
    pub container: ContainerAsync<RedisImage>,
}

impl RedisTestContext {
    pub fn builder() -> RedisTestContextBuilder {
        RedisTestContextBuilder::new()
    }

    pub fn store(&self) -> Arc<RedisKeyValueStore> {
        self.context.store()
    }

    pub fn cache(&self) -> LockingCache {
        self.context.cache()
    }

    pub fn url(&self) -> String {
        self.context.url()
    }

    pub(crate) async fn restore(builder: RedisTestContextBuilder) -> Self {
        // 1. Démarrage de l'infrastructure physique (Docker)
        let container = RedisImage::default()
            .with_tag(&builder.image_tag)
            .start()
            .await
            .expect("Échec du démarrage de Redis");

        let host = container.get_host().await.unwrap();
        let port = container
            .get_host_port_ipv4(builder.container_port)
            .await
            .unwrap();
        let url = format!("redis://{}:{}", host, port);

        // 2. Création du contexte logique (production), branché sur le
        // container sans lire l'ENV
        let mut redis_builder = RedisContext::builder_raw().with_url(&url);

        if let Some(max) = builder.max_clients {
            redis_builder = redis_builder.with_max_clients(max);
        }

        let context = redis_builder
            .build()
            .await
            .expect("Failed to build RedisContext for tests");

        Self { context, container }
    }
}
