use std::sync::{Arc, Mutex};

use bytes::Bytes;

use crate::storage::store::{Entry, Store, WrongTypeError};
use crate::storage::traits::KvStore;

/// Server state shared across all connections.
///
/// A `Db` instance is a handle to shared state. Cloning `Db` is shallow and
/// only incurs an atomic ref count increment.
#[derive(Debug, Clone)]
pub(crate) struct Db {
    /// The shared state is guarded by a `std::sync::Mutex`: no lock is held
    /// across an `.await` and the critical sections are very small.
    shared: Arc<Mutex<Store>>,
}

impl Db {
    pub(crate) fn new() -> Db {
        Db {
            shared: Arc::new(Mutex::new(Store::new())),
        }
    }
}

impl KvStore for Db {
    fn get(&self, key: &str) -> Result<Option<Bytes>, WrongTypeError> {
        let store = self.shared.lock().unwrap();
        Ok(store.string(key)?.cloned())
    }

    fn set(&self, key: String, value: Bytes) {
        let mut store = self.shared.lock().unwrap();
        store.entries.insert(key, Entry::Str(value));
    }

    fn hset(&self, key: String, field: String, value: Bytes) -> Result<u64, WrongTypeError> {
        let mut store = self.shared.lock().unwrap();
        let fields = store.hash_mut(key)?;

        match fields.insert(field, value) {
            Some(_) => Ok(0),
            None => Ok(1),
        }
    }

    fn hgetall(&self, key: &str) -> Result<Vec<(String, Bytes)>, WrongTypeError> {
        let store = self.shared.lock().unwrap();

        match store.entries.get(key) {
            None => Ok(Vec::new()),
            Some(Entry::Hash(fields)) => Ok(fields
                .iter()
                .map(|(field, value)| (field.clone(), value.clone()))
                .collect()),
            Some(Entry::Str(_)) => Err(WrongTypeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let db = Db::new();
        assert_eq!(db.get("Holberton"), Ok(None));
        assert_eq!(db.hgetall("HolbertonSchools"), Ok(vec![]));
    }

    #[test]
    fn hset_counts_only_new_fields() {
        let db = Db::new();
        assert_eq!(db.hset("schools".into(), "Cali".into(), "40".into()), Ok(1));
        assert_eq!(db.hset("schools".into(), "Cali".into(), "41".into()), Ok(0));

        let fields = db.hgetall("schools").unwrap();
        assert_eq!(fields, vec![("Cali".to_string(), Bytes::from("41"))]);
    }

    #[test]
    fn kinds_do_not_mix() {
        let db = Db::new();
        db.set("Holberton".into(), "100".into());
        assert_eq!(
            db.hset("Holberton".into(), "f".into(), "v".into()),
            Err(WrongTypeError)
        );
        assert_eq!(db.hgetall("Holberton"), Err(WrongTypeError));

        db.hset("schools".into(), "Paris".into(), "2".into()).unwrap();
        assert_eq!(db.get("schools"), Err(WrongTypeError));

        // SET replaces a value of any kind.
        db.set("schools".into(), "3".into());
        assert_eq!(db.get("schools"), Ok(Some(Bytes::from("3"))));
    }
}
