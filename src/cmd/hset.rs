use bytes::Bytes;
use log::debug;

use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::connection::parse::Parse;
use crate::error::{StoreConnectionError, StoreParseError};
use crate::storage::db::Db;
use crate::storage::traits::KvStore;

/// Set `field` in the hash stored at `key` to `value`.
///
/// The reply is the number of fields that were added; overwriting an existing
/// field counts as `0`.
#[derive(Debug)]
pub struct HSet {
    key: String,
    field: String,
    value: Bytes,
}

impl HSet {
    pub fn new(key: impl ToString, field: impl ToString, value: impl ToString) -> HSet {
        HSet {
            key: key.to_string(),
            field: field.to_string(),
            value: Bytes::from(value.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Only the single field form is accepted:
    ///
    /// ```text
    /// HSET key field value
    /// ```
    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<HSet, StoreParseError> {
        let key = parse.next_string()?;
        let field = parse.next_string()?;
        let value = parse.next_bytes()?;
        Ok(HSet { key, field, value })
    }

    pub(crate) async fn apply(self, db: &Db, dst: &mut Connection) -> Result<(), StoreConnectionError> {
        let response = match db.hset(self.key, self.field, self.value) {
            Ok(added) => Frame::Integer(added),
            Err(err) => Frame::Error(err.to_string()),
        };

        debug!("hset command applied resp: {:?}", response);

        dst.write_frame(&response).await
    }

    pub(crate) fn into_frame(self) -> Frame {
        Frame::command(vec![
            Bytes::from("hset"),
            Bytes::from(self.key),
            Bytes::from(self.field),
            self.value,
        ])
    }
}
