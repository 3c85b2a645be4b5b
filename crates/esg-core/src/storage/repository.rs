//! KeyValueStore trait.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;

/// A persistent string-keyed store of JSON values.
///
/// Implementations are injected into the repositories; there is no global
/// instance. Writers replace the whole value under a key, so concurrent writers
/// resolve last-writer-wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))`: Key present
    /// - `Ok(None)`: Key absent
    /// - `Err(_)`: The store could not be read
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replaces the value stored under `key`.
    ///
    /// A failed write leaves the previous value untouched.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Typed list helpers layered over [`KeyValueStore`].
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Reads a JSON array under `key` into a typed list. Absent reads as empty.
    async fn get_list<T>(&self, key: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Serializes `items` and writes them under `key` in one `set`.
    async fn set_list<T>(&self, key: &str, items: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(items)?;
        self.set(key, value).await
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
