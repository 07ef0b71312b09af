use bytes::Bytes;
use log::debug;

use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::connection::parse::Parse;
use crate::error::{StoreConnectionError, StoreParseError};
use crate::storage::db::Db;
use crate::storage::traits::KvStore;

/// Returns all fields and values of the hash stored at `key`.
///
/// The reply is a flat array `field1 value1 field2 value2 ...`, empty when the
/// key does not exist.
#[derive(Debug)]
pub struct HGetAll {
    key: String,
}

impl HGetAll {
    pub fn new(key: impl ToString) -> HGetAll {
        HGetAll {
            key: key.to_string(),
        }
    }

    /// Expects:
    ///
    /// ```text
    /// HGETALL key
    /// ```
    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<HGetAll, StoreParseError> {
        let key = parse.next_string()?;
        Ok(HGetAll { key })
    }

    pub(crate) async fn apply(self, db: &Db, dst: &mut Connection) -> Result<(), StoreConnectionError> {
        let response = match db.hgetall(&self.key) {
            Ok(fields) => {
                let mut response = Frame::array();
                for (field, value) in fields {
                    response.push_bulk(Bytes::from(field))?;
                    response.push_bulk(value)?;
                }
                response
            }
            Err(err) => Frame::Error(err.to_string()),
        };

        debug!("hgetall command applied resp: {:?}", response);

        dst.write_frame(&response).await
    }

    pub(crate) fn into_frame(self) -> Frame {
        Frame::command(vec![Bytes::from("hgetall"), Bytes::from(self.key)])
    }
}
