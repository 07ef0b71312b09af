use std::vec;

use bytes::Bytes;

use crate::connection::frame::Frame;
use crate::error::StoreParseError;

/// Cursor over the tokens of a command frame.
///
/// Commands arrive as array frames where every entry is one token. Each
/// command type pulls its arguments out with `next_*` and calls `finish` to
/// reject trailing tokens.
#[derive(Debug)]
pub(crate) struct Parse {
    parts: vec::IntoIter<Frame>,
}

impl Parse {
    /// Returns `Err` if `frame` is not an array frame.
    pub(crate) fn new(frame: Frame) -> Result<Parse, StoreParseError> {
        match frame {
            Frame::Array(array) => Ok(Parse {
                parts: array.into_iter(),
            }),
            frame => Err(StoreParseError::Parse(format!(
                "protocol error; expected array, got {:?}",
                frame
            ))),
        }
    }

    fn next(&mut self) -> Result<Frame, StoreParseError> {
        self.parts.next().ok_or(StoreParseError::EndOfStream)
    }

    /// Return the next entry as a UTF-8 string.
    pub(crate) fn next_string(&mut self) -> Result<String, StoreParseError> {
        self.next()?.into_string()
    }

    /// Return the next entry as raw bytes.
    ///
    /// Error frames are strings on the wire but are not accepted here.
    pub(crate) fn next_bytes(&mut self) -> Result<Bytes, StoreParseError> {
        match self.next()? {
            Frame::Simple(s) => Ok(Bytes::from(s.into_bytes())),
            Frame::Bulk(data) => Ok(data),
            frame => Err(StoreParseError::Parse(format!(
                "protocol error; expected simple frame or bulk frame, got {:?}",
                frame
            ))),
        }
    }

    /// Ensure there are no more entries in the array
    pub(crate) fn finish(&mut self) -> Result<(), StoreParseError> {
        if self.parts.next().is_none() {
            Ok(())
        } else {
            Err(StoreParseError::Parse(
                "protocol error; expected end of frame, but there was more".into(),
            ))
        }
    }
}
