// src/infrastructure/redis/repositories/mod.rs

mod redis_key_value_store;

pub use redis_key_value_store::RedisKeyValueStore;
