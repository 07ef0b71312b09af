use bytes::Bytes;
use log::debug;

use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::connection::parse::Parse;
use crate::error::{StoreConnectionError, StoreParseError};
use crate::storage::db::Db;
use crate::storage::traits::KvStore;

/// Set `key` to hold the string `value`.
///
/// If `key` already holds a value, it is overwritten, regardless of its kind.
#[derive(Debug)]
pub struct Set {
    key: String,
    value: Bytes,
}

impl Set {
    /// Numeric values are stored as their decimal representation.
    pub fn new(key: impl ToString, value: impl ToString) -> Set {
        Set {
            key: key.to_string(),
            value: Bytes::from(value.to_string()),
        }
    }

    /// Expects:
    ///
    /// ```text
    /// SET key value
    /// ```
    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Set, StoreParseError> {
        let key = parse.next_string()?;
        let value = parse.next_bytes()?;
        Ok(Set { key, value })
    }

    /// Stores the value and answers `OK`.
    pub(crate) async fn apply(self, db: &Db, dst: &mut Connection) -> Result<(), StoreConnectionError> {
        db.set(self.key, self.value);

        let response = Frame::Simple("OK".to_string());
        debug!("set command applied resp: {:?}", response);

        dst.write_frame(&response).await
    }

    pub(crate) fn into_frame(self) -> Frame {
        Frame::command(vec![Bytes::from("set"), Bytes::from(self.key), self.value])
    }
}
