use bytes::Bytes;
use log::debug;

use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::connection::parse::Parse;
use crate::error::{StoreConnectionError, StoreParseError};
use crate::storage::db::Db;
use crate::storage::traits::KvStore;

/// Get the value of key.
///
/// If the key does not exist the special value nil is returned. An error is
/// returned if the value stored at key is a hash.
#[derive(Debug)]
pub struct Get {
    key: String,
}

impl Get {
    pub fn new(key: impl ToString) -> Get {
        Get {
            key: key.to_string(),
        }
    }

    /// Parse a `Get` instance from a received frame.
    ///
    /// The `GET` string has already been consumed. Expects:
    ///
    /// ```text
    /// GET key
    /// ```
    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Get, StoreParseError> {
        let key = parse.next_string()?;
        Ok(Get { key })
    }

    /// Apply the `Get` command to the specified `Db` instance and write the
    /// response to `dst`.
    pub(crate) async fn apply(self, db: &Db, dst: &mut Connection) -> Result<(), StoreConnectionError> {
        let response = match db.get(&self.key) {
            Ok(Some(value)) => Frame::Bulk(value),
            Ok(None) => Frame::Null,
            Err(err) => Frame::Error(err.to_string()),
        };

        debug!("get command applied resp: {:?}", response);

        dst.write_frame(&response).await
    }

    /// Converts the command into the frame sent to the store.
    pub(crate) fn into_frame(self) -> Frame {
        Frame::command(vec![Bytes::from("get"), Bytes::from(self.key)])
    }
}
