// src/infrastructure/redis/utils/redis_test_builder.rs

use crate::infrastructure::redis::utils::RedisTestContext;

pub struct RedisTestContextBuilder {
    pub(crate) image_tag: String,
    pub(crate) container_port: u16,
    pub(crate) max_clients: Option<usize>,
}

impl Default for RedisTestContextBuilder {
    fn default() -> Self {
        Self {
            image_tag: "7.2-alpine".to_string(),
            container_port: 6379,
            max_clients: None,
        }
    }
}

impl RedisTestContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tag = tag.into();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.max_clients = Some(max);
        self
    }

    pub async fn build(self) -> RedisTestContext {
        RedisTestContext::restore(self).await
    }
}
