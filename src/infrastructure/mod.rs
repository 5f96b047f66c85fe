// src/infrastructure/mod.rs

#[cfg(feature = "redis")]
pub mod redis;
