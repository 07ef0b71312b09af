use bytes::Bytes;

use crate::storage::store::WrongTypeError;

/// Operations the reference store serves.
///
/// Keys hold either a string or a hash; touching a key with the operation of
/// the other kind fails with `WrongTypeError`.
pub trait KvStore {
    /// Returns `None` if nothing was ever assigned to the key.
    fn get(&self, key: &str) -> Result<Option<Bytes>, WrongTypeError>;

    /// Set the value associated with a key.
    ///
    /// Any previous value is replaced, whatever its kind.
    fn set(&self, key: String, value: Bytes);

    /// Set `field` of the hash stored at `key`, creating the hash if needed.
    ///
    /// Returns the number of fields that were added, `0` when an existing
    /// field was overwritten.
    fn hset(&self, key: String, field: String, value: Bytes) -> Result<u64, WrongTypeError>;

    /// Returns every field and value of the hash, empty if the key is absent.
    fn hgetall(&self, key: &str) -> Result<Vec<(String, Bytes)>, WrongTypeError>;
}
