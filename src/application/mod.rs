// src/application/mod.rs

mod lock_manager;
mod locking_cache;

pub use lock_manager::{LockManager, LockToken};
pub use locking_cache::LockingCache;
