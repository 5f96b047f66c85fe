// src/errors/mod.rs

mod cache_error;
mod result;

pub use cache_error::CacheError;
pub use result::CacheResult;
