//! Typed load/save over a [`Store`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::Store;
use crate::error::StoreError;
use crate::keys::StoreKey;

/// Load and parse `key`. Absent → `T::default()`.
///
/// Unparsable JSON is logged, removed from the store and replaced by
/// `T::default()`; only I/O failures are errors.
pub fn load<S, T>(store: &mut S, key: StoreKey) -> Result<T, StoreError>
where
    S: Store + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.read(key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "corrupted stored value discarded");
            store.remove(key)?;
            Ok(T::default())
        }
    }
}

/// Serialize `value` as JSON under `key`.
pub fn save<S, T>(store: &mut S, key: StoreKey, value: &T) -> Result<(), StoreError>
where
    S: Store + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode { key, source })?;
    store.write(key, &json)
}
