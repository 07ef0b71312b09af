//! Request/response exchange over an established connection.

use std::collections::HashMap;

use log::debug;

use crate::client::operation::{Operation, Reply};
use crate::cmd::get::Get;
use crate::cmd::hgetall::HGetAll;
use crate::cmd::hset::HSet;
use crate::cmd::set::Set;
use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::error::{ClientError, StoreConnectionError};

/// Established connection with a store.
///
/// Backed by a single `TcpStream`. Each call writes one request frame and
/// reads exactly one response frame; there is no pipelining, retrying or
/// caching.
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) connection: Connection,
}

impl Session {
    pub(crate) fn new(connection: Connection) -> Session {
        Session { connection }
    }

    /// Performs one round trip for `op`.
    pub(crate) async fn execute(&mut self, op: Operation) -> Result<Reply, ClientError> {
        match op {
            Operation::Set { key, value } => self.set(Set::new(key, value)).await.map(Reply::Ack),
            Operation::Get { key } => self.get(Get::new(key)).await.map(Reply::Value),
            Operation::HashSet { key, field, value } => self
                .hset(HSet::new(key, field, value))
                .await
                .map(Reply::Added),
            Operation::HashGetAll { key } => {
                self.hgetall(HGetAll::new(key)).await.map(Reply::Fields)
            }
        }
    }

    /// On success the store answers with a simple string, `OK`.
    async fn set(&mut self, cmd: Set) -> Result<String, ClientError> {
        let frame = cmd.into_frame();
        debug!("set command request: {:?}", frame);

        self.connection.write_frame(&frame).await?;

        match self.read_response().await? {
            Frame::Simple(ack) => Ok(ack),
            frame => Err(ClientError::UnexpectedResponse(frame.to_string())),
        }
    }

    /// `Null` represents the key not being present.
    async fn get(&mut self, cmd: Get) -> Result<Option<String>, ClientError> {
        let frame = cmd.into_frame();
        debug!("get command request: {:?}", frame);

        self.connection.write_frame(&frame).await?;

        match self.read_response().await? {
            Frame::Null => Ok(None),
            frame @ Frame::Simple(_) | frame @ Frame::Bulk(_) => frame
                .into_string()
                .map(Some)
                .map_err(|err| ClientError::UnexpectedResponse(err.to_string())),
            frame => Err(ClientError::UnexpectedResponse(frame.to_string())),
        }
    }

    async fn hset(&mut self, cmd: HSet) -> Result<u64, ClientError> {
        let frame = cmd.into_frame();
        debug!("hset command request: {:?}", frame);

        self.connection.write_frame(&frame).await?;

        match self.read_response().await? {
            Frame::Integer(added) => Ok(added),
            frame => Err(ClientError::UnexpectedResponse(frame.to_string())),
        }
    }

    /// The store answers with a flat `field value field value ...` array.
    async fn hgetall(&mut self, cmd: HGetAll) -> Result<HashMap<String, String>, ClientError> {
        let frame = cmd.into_frame();
        debug!("hgetall command request: {:?}", frame);

        self.connection.write_frame(&frame).await?;

        let parts = match self.read_response().await? {
            Frame::Array(parts) => parts,
            // Some stores answer a missing hash with a null instead of an
            // empty array.
            Frame::Null => return Ok(HashMap::new()),
            frame => return Err(ClientError::UnexpectedResponse(frame.to_string())),
        };

        if parts.len() % 2 != 0 {
            return Err(ClientError::UnexpectedResponse(format!(
                "hgetall returned an odd number of entries: {}",
                parts.len()
            )));
        }

        let mut fields = HashMap::with_capacity(parts.len() / 2);
        let mut parts = parts.into_iter();
        while let (Some(field), Some(value)) = (parts.next(), parts.next()) {
            let field = field
                .into_string()
                .map_err(|err| ClientError::UnexpectedResponse(err.to_string()))?;
            let value = value
                .into_string()
                .map_err(|err| ClientError::UnexpectedResponse(err.to_string()))?;
            fields.insert(field, value);
        }

        Ok(fields)
    }

    /// Reads a response frame from the socket.
    ///
    /// An `Error` frame is converted to `Err` carrying the store's message.
    async fn read_response(&mut self) -> Result<Frame, StoreConnectionError> {
        let response = self.connection.read_frame().await?;

        debug!("read response: {:?}", response);

        match response {
            Some(Frame::Error(msg)) => Err(StoreConnectionError::CommandExecute(msg)),
            Some(frame) => Ok(frame),
            // The store closed the connection without answering.
            None => Err(StoreConnectionError::Disconnect),
        }
    }

    pub(crate) async fn shutdown(&mut self) -> Result<(), StoreConnectionError> {
        self.connection.shutdown().await
    }
}
