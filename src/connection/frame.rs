//! Provides a type representing a RESP frame as well as utilities for
//! parsing frames from a byte array.
//!
//! Redis serialization protocol (RESP) specification:
//!  https://redis.io/docs/reference/protocol-spec/

use std::convert::TryInto;
use std::fmt;
use std::io::Cursor;

use bytes::{Buf, Bytes};

use crate::error::StoreParseError;

/// A frame in the RESP protocol.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(u64),
    Bulk(Bytes),
    Null,
    Array(Vec<Frame>),
}

impl PartialEq<&str> for Frame {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Frame::Simple(s) => s.eq(other),
            Frame::Bulk(s) => s.eq(other),
            _ => false,
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use std::str;

        match self {
            Frame::Simple(response) => response.fmt(fmt),
            Frame::Error(msg) => write!(fmt, "error: {}", msg),
            Frame::Integer(num) => num.fmt(fmt),
            Frame::Bulk(msg) => match str::from_utf8(msg) {
                Ok(string) => string.fmt(fmt),
                Err(_) => write!(fmt, "{:?}", msg),
            },
            Frame::Null => "(nil)".fmt(fmt),
            Frame::Array(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(fmt, " ")?;
                    }
                    part.fmt(fmt)?;
                }

                Ok(())
            }
        }
    }
}

impl Frame {
    /// Returns an empty array
    pub(crate) fn array() -> Frame {
        Frame::Array(vec![])
    }

    /// Push a "bulk" frame into the array. `self` must be an Array frame.
    pub(crate) fn push_bulk(&mut self, bytes: Bytes) -> Result<(), StoreParseError> {
        match self {
            Frame::Array(vec) => {
                vec.push(Frame::Bulk(bytes));
                Ok(())
            }
            _ => Err(StoreParseError::ParseArrayFrame),
        }
    }

    /// Builds a request frame: an array of bulk strings, the command name
    /// first.
    pub(crate) fn command(parts: impl IntoIterator<Item = Bytes>) -> Frame {
        Frame::Array(parts.into_iter().map(Frame::Bulk).collect())
    }

    /// Decodes a `Simple` or `Bulk` frame as a UTF-8 string.
    pub(crate) fn into_string(self) -> Result<String, StoreParseError> {
        match self {
            Frame::Simple(s) => Ok(s),
            Frame::Bulk(data) => Ok(String::from_utf8(data.to_vec())?),
            frame => Err(StoreParseError::Parse(format!(
                "expected simple frame or bulk frame, got {:?}",
                frame
            ))),
        }
    }

    /// Checks if an entire message can be decoded from `src`
    pub fn check(src: &mut Cursor<&[u8]>) -> Result<(), StoreParseError> {
        match get_u8(src)? {
            b'+' | b'-' => {
                get_line(src)?;
                Ok(())
            }
            b':' => {
                let _ = get_decimal(src)?;
                Ok(())
            }
            b'$' => {
                if b'-' == peek_u8(src)? {
                    // Skip '-1\r\n'
                    skip(src, 4)
                } else {
                    let len: usize = get_decimal(src)?.try_into()?;

                    // skip that number of bytes + 2 (\r\n).
                    skip(src, len + 2)
                }
            }
            b'*' => {
                let len = get_decimal(src)?;

                for _ in 0..len {
                    Frame::check(src)?;
                }

                Ok(())
            }
            actual => Err(StoreParseError::Parse(format!(
                "protocol error; invalid frame type byte `{}`",
                actual
            ))),
        }
    }

    /// The message has already been validated with `check`, so parse the bytes to Frame
    pub fn parse(src: &mut Cursor<&[u8]>) -> Result<Frame, StoreParseError> {
        match get_u8(src)? {
            b'+' => Ok(Frame::Simple(get_string(src)?)),
            b'-' => Ok(Frame::Error(get_string(src)?)),
            b':' => Ok(Frame::Integer(get_decimal(src)?)),
            b'$' => {
                if b'-' == peek_u8(src)? {
                    let line = get_line(src)?;

                    if line != b"-1" {
                        return Err(StoreParseError::Parse(
                            "protocol error; invalid frame format".into(),
                        ));
                    }

                    return Ok(Frame::Null);
                }

                let len = get_decimal(src)?.try_into()?;
                let n = len + 2;

                if src.remaining() < n {
                    return Err(StoreParseError::Incomplete);
                }

                let data = Bytes::copy_from_slice(&src.chunk()[..len]);
                skip(src, n)?;

                Ok(Frame::Bulk(data))
            }
            b'*' => {
                let len = get_decimal(src)?.try_into()?;
                let mut out = Vec::with_capacity(len);

                for _ in 0..len {
                    out.push(Frame::parse(src)?);
                }

                Ok(Frame::Array(out))
            }
            actual => Err(StoreParseError::Parse(format!(
                "protocol error; invalid frame type byte `{}`",
                actual
            ))),
        }
    }

    /// Serializes the frame into `dst`.
    ///
    /// Arrays are encoded recursively, so nested arrays are supported even
    /// though the store never produces them.
    pub(crate) fn encode(&self, dst: &mut Vec<u8>) {
        match self {
            Frame::Simple(val) => {
                dst.push(b'+');
                dst.extend_from_slice(val.as_bytes());
                dst.extend_from_slice(b"\r\n");
            }
            Frame::Error(val) => {
                dst.push(b'-');
                dst.extend_from_slice(val.as_bytes());
                dst.extend_from_slice(b"\r\n");
            }
            Frame::Integer(val) => {
                dst.push(b':');
                dst.extend_from_slice(val.to_string().as_bytes());
                dst.extend_from_slice(b"\r\n");
            }
            Frame::Null => dst.extend_from_slice(b"$-1\r\n"),
            Frame::Bulk(val) => {
                dst.push(b'$');
                dst.extend_from_slice(val.len().to_string().as_bytes());
                dst.extend_from_slice(b"\r\n");
                dst.extend_from_slice(val);
                dst.extend_from_slice(b"\r\n");
            }
            Frame::Array(parts) => {
                dst.push(b'*');
                dst.extend_from_slice(parts.len().to_string().as_bytes());
                dst.extend_from_slice(b"\r\n");
                for part in parts {
                    part.encode(dst);
                }
            }
        }
    }
}

fn skip(src: &mut Cursor<&[u8]>, n: usize) -> Result<(), StoreParseError> {
    if src.remaining() < n {
        return Err(StoreParseError::Incomplete);
    }

    src.advance(n);
    Ok(())
}

fn peek_u8(src: &mut Cursor<&[u8]>) -> Result<u8, StoreParseError> {
    if !src.has_remaining() {
        return Err(StoreParseError::Incomplete);
    }

    Ok(src.chunk()[0])
}

fn get_u8(src: &mut Cursor<&[u8]>) -> Result<u8, StoreParseError> {
    if !src.has_remaining() {
        return Err(StoreParseError::Incomplete);
    }

    Ok(src.get_u8())
}

/// Read a line and decode it as UTF-8
fn get_string(src: &mut Cursor<&[u8]>) -> Result<String, StoreParseError> {
    let line = get_line(src)?.to_vec();
    Ok(String::from_utf8(line)?)
}

/// Read a new-line terminated decimal
fn get_decimal(src: &mut Cursor<&[u8]>) -> Result<u64, StoreParseError> {
    use atoi::atoi;

    let line = get_line(src)?;

    atoi::<u64>(line).ok_or_else(|| {
        StoreParseError::Parse("protocol error; invalid frame format to get decimal".into())
    })
}

/// Find a line in a frame
fn get_line<'a>(src: &mut Cursor<&'a [u8]>) -> Result<&'a [u8], StoreParseError> {
    let start = src.position() as usize;
    let buf: &'a [u8] = *src.get_ref();

    match buf[start..].windows(2).position(|w| w == b"\r\n") {
        Some(offset) => {
            // Move the cursor *after* the \n
            src.set_position((start + offset + 2) as u64);
            Ok(&buf[start..start + offset])
        }
        None => Err(StoreParseError::Incomplete),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(input: &[u8]) -> Result<Frame, StoreParseError> {
        let mut cursor = Cursor::new(input);
        Frame::check(&mut cursor)?;
        cursor.set_position(0);
        Frame::parse(&mut cursor)
    }

    #[test]
    fn parses_simple_string() {
        assert_eq!(decode(b"+OK\r\n").unwrap(), Frame::Simple("OK".into()));
    }

    #[test]
    fn parses_error_verbatim() {
        let frame = decode(b"-WRONGTYPE bad kind\r\n").unwrap();
        assert_eq!(frame, Frame::Error("WRONGTYPE bad kind".into()));
    }

    #[test]
    fn parses_bulk_and_null() {
        assert_eq!(
            decode(b"$3\r\n100\r\n").unwrap(),
            Frame::Bulk(Bytes::from_static(b"100"))
        );
        assert_eq!(decode(b"$-1\r\n").unwrap(), Frame::Null);
    }

    #[test]
    fn parses_hgetall_reply() {
        let frame = decode(b"*4\r\n$8\r\nPortland\r\n$2\r\n50\r\n$4\r\nCali\r\n$2\r\n40\r\n").unwrap();
        match frame {
            Frame::Array(parts) => {
                assert_eq!(parts.len(), 4);
                assert_eq!(parts[0], "Portland");
                assert_eq!(parts[3], "40");
            }
            frame => panic!("unexpected frame {:?}", frame),
        }
    }

    #[test]
    fn reports_incomplete_input() {
        assert!(matches!(
            decode(b"$5\r\nhel"),
            Err(StoreParseError::Incomplete)
        ));
        assert!(matches!(decode(b"*2\r\n:1\r\n"), Err(StoreParseError::Incomplete)));
        assert!(matches!(decode(b"+OK"), Err(StoreParseError::Incomplete)));
    }

    #[test]
    fn rejects_unknown_type_byte() {
        assert!(matches!(decode(b"?oops\r\n"), Err(StoreParseError::Parse(_))));
    }

    #[test]
    fn parse_without_check_rejects_unknown_type_byte() {
        let mut cursor = Cursor::new(&b"*1\r\n%2\r\n"[..]);
        match Frame::parse(&mut cursor) {
            Err(StoreParseError::Parse(msg)) => assert!(msg.contains("37"), "{}", msg),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn encodes_command_as_bulk_array() {
        let mut buf = Vec::new();
        Frame::command(vec![
            Bytes::from("hset"),
            Bytes::from("HolbertonSchools"),
            Bytes::from("New York"),
            Bytes::from("20"),
        ]).encode(&mut buf);
        assert_eq!(
            &buf[..],
            &b"*4\r\n$4\r\nhset\r\n$16\r\nHolbertonSchools\r\n$8\r\nNew York\r\n$2\r\n20\r\n"[..]
        );
        assert_eq!(decode(&buf).unwrap().to_string(), "hset HolbertonSchools New York 20");
    }
}
