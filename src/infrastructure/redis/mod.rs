// src/infrastructure/redis/mod.rs

pub mod factories;
pub mod repositories;
pub mod utils;
