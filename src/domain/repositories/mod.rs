// src/domain/repositories/mod.rs

mod key_value_store;
mod key_value_store_stub;

pub use key_value_store::KeyValueStore;
pub use key_value_store_stub::{KeyValueStoreStub, StubEntry};
