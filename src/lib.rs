// src/lib.rs

pub mod application;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use application::{LockManager, LockToken, LockingCache};
pub use domain::FetchOptions;
