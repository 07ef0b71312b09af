use std::collections::HashMap;

use crate::error::ClientError;

/// One request issued through a `Client`.
///
/// Every call creates its own `Operation`; the client never merges or
/// deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Set { key: String, value: String },
    Get { key: String },
    HashSet { key: String, field: String, value: String },
    HashGetAll { key: String },
}

impl Operation {
    /// Numeric values are stored as their decimal string.
    pub fn set(key: impl ToString, value: impl ToString) -> Operation {
        Operation::Set {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn get(key: impl ToString) -> Operation {
        Operation::Get {
            key: key.to_string(),
        }
    }

    pub fn hset(key: impl ToString, field: impl ToString, value: impl ToString) -> Operation {
        Operation::HashSet {
            key: key.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn hgetall(key: impl ToString) -> Operation {
        Operation::HashGetAll {
            key: key.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Operation::Set { key, .. }
            | Operation::Get { key }
            | Operation::HashSet { key, .. }
            | Operation::HashGetAll { key } => key,
        }
    }

    /// Rejects requests that are never sent to the store: a `Set` needs a
    /// non-empty key. Reads of any key, the empty one included, go through.
    pub(crate) fn validate(&self) -> Result<(), ClientError> {
        match self {
            Operation::Set { key, .. } if key.is_empty() => Err(ClientError::InvalidKey),
            _ => Ok(()),
        }
    }
}

/// Successful resolution of an `Operation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Acknowledgement of `Set`, `"OK"` for a RESP store.
    Ack(String),
    /// Value read by `Get`, `None` when the key does not exist.
    Value(Option<String>),
    /// Number of fields a `HashSet` added.
    Added(u64),
    /// Fields read by `HashGetAll`, empty when the key does not exist.
    Fields(HashMap<String, String>),
}

impl Reply {
    pub(crate) fn into_ack(self) -> Result<String, ClientError> {
        match self {
            Reply::Ack(ack) => Ok(ack),
            reply => Err(reply.mismatch()),
        }
    }

    pub(crate) fn into_value(self) -> Result<Option<String>, ClientError> {
        match self {
            Reply::Value(value) => Ok(value),
            reply => Err(reply.mismatch()),
        }
    }

    pub(crate) fn into_added(self) -> Result<u64, ClientError> {
        match self {
            Reply::Added(added) => Ok(added),
            reply => Err(reply.mismatch()),
        }
    }

    pub(crate) fn into_fields(self) -> Result<HashMap<String, String>, ClientError> {
        match self {
            Reply::Fields(fields) => Ok(fields),
            reply => Err(reply.mismatch()),
        }
    }

    fn mismatch(self) -> ClientError {
        ClientError::UnexpectedResponse(format!("{:?}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_become_strings() {
        assert_eq!(
            Operation::hset("HolbertonSchools", "Paris", 2),
            Operation::HashSet {
                key: "HolbertonSchools".into(),
                field: "Paris".into(),
                value: "2".into(),
            }
        );
    }

    #[test]
    fn only_set_requires_a_key() {
        assert_eq!(Operation::set("", "x").validate(), Err(ClientError::InvalidKey));
        assert_eq!(Operation::set("Holberton", "x").validate(), Ok(()));
        assert_eq!(Operation::get("").validate(), Ok(()));
        assert_eq!(Operation::hgetall("").validate(), Ok(()));
    }

    #[test]
    fn reply_kind_mismatch_is_reported() {
        assert_eq!(Reply::Added(1).into_added(), Ok(1));
        assert!(matches!(
            Reply::Added(1).into_ack(),
            Err(ClientError::UnexpectedResponse(_))
        ));
    }
}
