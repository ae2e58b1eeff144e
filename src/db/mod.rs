// Key/value persistence for the lookup cache
//
// Keys are normalized call signs, values are serialized cache entries.
// `entries` yields pairs in storage order, which rehydrates the history.

pub mod init;
pub mod memory;
pub mod migrations;

pub use init::SqliteStore;
pub use memory::MemoryStore;

use crate::error::Result;

#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace; replacing keeps the key's storage position
    async fn put(&mut self, key: &str, value: String) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    /// All (key, value) pairs in storage order
    async fn entries(&self) -> Result<Vec<(String, String)>>;
}
