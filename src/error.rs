use std::io;

use thiserror::Error;

use crate::client::ConnectionState;

#[derive(Error, Debug)]
pub enum StoreServerError {
    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// Errors resolved to callers of the `Client` operations.
///
/// Store-side error replies and transport failures carry the original
/// message unmodified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The handshake failed or the transport broke.
    #[error("{0}")]
    Connection(String),

    /// The operation was issued while the connection was not `Connected`.
    #[error("client is not connected to the store, state: {0}")]
    NotConnected(ConnectionState),

    /// The store answered with an error reply.
    #[error("{0}")]
    Store(String),

    #[error("key must not be empty")]
    InvalidKey,

    /// The reply did not have the shape the command expects.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<StoreConnectionError> for ClientError {
    fn from(err: StoreConnectionError) -> Self {
        match err {
            StoreConnectionError::CommandExecute(msg) => ClientError::Store(msg),
            err => ClientError::Connection(err.to_string()),
        }
    }
}

/// Error encountered while parsing a frame.
///
/// Only `EndOfStream` errors are handled at runtime. All other errors result in
/// the connection being terminated.
#[derive(Error, Debug)]
pub enum StoreParseError {
    #[error("invalid message encoding, parse failed: {0}")]
    Parse(String),

    /// Attempting to extract a value failed due to the frame being fully
    /// consumed.
    #[error("protocol error; unexpected end of stream")]
    EndOfStream,

    #[error("not enough data is available to parse a message")]
    Incomplete,

    #[error("not an array frame")]
    ParseArrayFrame,

    #[error(transparent)]
    ParseInt(#[from] std::num::TryFromIntError),
    #[error(transparent)]
    ParseUtf8(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum StoreConnectionError {
    #[error("connection reset by peer")]
    Disconnect,

    #[error(transparent)]
    ParseFrame(#[from] StoreParseError),

    #[error(transparent)]
    IoError(#[from] io::Error),

    /// The peer answered with an error frame.
    #[error("{0}")]
    CommandExecute(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum StoreConfigError {
    #[error("invalid port `{0}` in {1}")]
    InvalidPort(String, &'static str),
}
