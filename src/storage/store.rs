//! Core storage implementation for the reference store
use std::collections::HashMap;

use bytes::Bytes;
use thiserror::Error;

/// Returned when a key is used with an operation of the other value kind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
pub struct WrongTypeError;

#[derive(Debug, Default)]
pub(crate) struct Store {
    /// The key-value data. A plain `HashMap` is enough for a single node
    /// without expiration.
    pub(crate) entries: HashMap<String, Entry>,
}

/// Entry in the key-value store
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Entry {
    Str(Bytes),
    Hash(HashMap<String, Bytes>),
}

impl Store {
    pub(crate) fn new() -> Store {
        Store::default()
    }

    pub(crate) fn string(&self, key: &str) -> Result<Option<&Bytes>, WrongTypeError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(Entry::Str(data)) => Ok(Some(data)),
            Some(Entry::Hash(_)) => Err(WrongTypeError),
        }
    }

    /// Returns the hash at `key`, inserting an empty one when the key is
    /// absent.
    pub(crate) fn hash_mut(
        &mut self,
        key: String,
    ) -> Result<&mut HashMap<String, Bytes>, WrongTypeError> {
        match self
            .entries
            .entry(key)
            .or_insert_with(|| Entry::Hash(HashMap::new()))
        {
            Entry::Hash(fields) => Ok(fields),
            Entry::Str(_) => Err(WrongTypeError),
        }
    }
}
