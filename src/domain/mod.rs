// src/domain/mod.rs

pub mod keys;
pub mod repositories;

mod fetch_options;

pub use fetch_options::FetchOptions;
