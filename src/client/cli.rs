//! Async client handle
//!
//! Provides the operations callers issue against the store. The socket itself
//! lives in a background task, see `worker`.

use std::collections::HashMap;

use log::debug;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::client::operation::{Operation, Reply};
use crate::client::state::ConnectionState;
use crate::client::worker::{self, Message};
use crate::consts::REQUEST_QUEUE_SIZE;
use crate::error::ClientError;

/// Handle to one connection with a store.
///
/// Created with [`connect`](fn@crate::client::connect). Construction returns
/// at once; the connection is established in the background and its progress
/// is published as a [`ConnectionState`].
///
/// `Client` is cheap to clone. All clones share the same connection, which
/// serves one request at a time; requests issued concurrently from different
/// tasks are answered in no particular order. Await a request before issuing
/// one that depends on it.
#[derive(Debug, Clone)]
pub struct Client {
    addr: String,
    requests: mpsc::Sender<Message>,
    state: watch::Receiver<ConnectionState>,
}

impl Client {
    /// Spawns the connection task for `addr` and returns immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(addr: impl Into<String>) -> Client {
        let addr = addr.into();
        let (requests, rx) = mpsc::channel(REQUEST_QUEUE_SIZE);
        let (state_tx, state) = watch::channel(ConnectionState::Connecting);

        debug!("connecting to {}", addr);
        tokio::spawn(worker::run(addr.clone(), rx, state_tx));

        Client {
            addr,
            requests,
            state,
        }
    }

    /// The address this client was bound to.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Snapshot of the connection state.
    pub fn state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    /// A receiver that observes every later state change.
    ///
    /// The current state is always readable from the receiver, so a
    /// subscriber created after the handshake still sees its outcome.
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    /// Calls `observer` with the connection state once the handshake has
    /// completed and again on every later change, until the client is closed.
    ///
    /// Changes that happen in quick succession may be coalesced; the observer
    /// always sees the latest state.
    pub fn observe<F>(&self, mut observer: F) -> JoinHandle<()>
    where
        F: FnMut(&ConnectionState) + Send + 'static,
    {
        let mut rx = self.state.clone();

        tokio::spawn(async move {
            loop {
                let current = rx.borrow_and_update().clone();
                if current != ConnectionState::Connecting {
                    observer(&current);
                }
                if current == ConnectionState::Closed || rx.changed().await.is_err() {
                    return;
                }
            }
        })
    }

    /// Waits for the handshake to complete.
    ///
    /// Resolves with `Err(Connection(msg))` if the handshake failed.
    pub async fn wait_connected(&self) -> Result<(), ClientError> {
        let mut rx = self.state.clone();

        loop {
            let current = rx.borrow_and_update().clone();
            match current {
                ConnectionState::Connecting => {}
                ConnectionState::Connected => return Ok(()),
                ConnectionState::Failed(msg) => return Err(ClientError::Connection(msg)),
                state @ ConnectionState::Closed => return Err(ClientError::NotConnected(state)),
            }

            if rx.changed().await.is_err() {
                return Err(ClientError::NotConnected(self.state()));
            }
        }
    }

    /// Set `key` to hold `value`, returning the store's acknowledgement.
    ///
    /// Numeric values are stored as their decimal string.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = store_client::client::connect("127.0.0.1:6379");
    ///
    ///     let reply = client.set("Holberton", 100).await.unwrap();
    ///     assert_eq!(reply, "OK");
    /// }
    /// ```
    pub async fn set(&self, key: &str, value: impl ToString) -> Result<String, ClientError> {
        self.execute(Operation::set(key, value)).await?.into_ack()
    }

    /// Get the value of `key`.
    ///
    /// If the key does not exist `None` is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// #[tokio::main]
    /// async fn main() {
    ///     let client = store_client::client::connect("127.0.0.1:6379");
    ///
    ///     client.set("Holberton", "100").await.unwrap();
    ///     let val = client.get("Holberton").await.unwrap();
    ///     assert_eq!(val.as_deref(), Some("100"));
    /// }
    /// ```
    pub async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        self.execute(Operation::get(key)).await?.into_value()
    }

    /// Set `field` of the hash at `key`. Returns how many fields were added.
    pub async fn hset(
        &self,
        key: &str,
        field: &str,
        value: impl ToString,
    ) -> Result<u64, ClientError> {
        self.execute(Operation::hset(key, field, value))
            .await?
            .into_added()
    }

    /// All fields of the hash at `key`, empty if the key does not exist.
    pub async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, ClientError> {
        self.execute(Operation::hgetall(key)).await?.into_fields()
    }

    /// Issues `op` and waits for its resolution.
    ///
    /// The future always completes: if the connection is gone the request
    /// resolves with `NotConnected`.
    pub async fn execute(&self, op: Operation) -> Result<Reply, ClientError> {
        let (resp, rx) = oneshot::channel();

        debug!("issue request: {:?}", op);

        if self.requests.send(Message::Request { op, resp }).await.is_err() {
            return Err(ClientError::NotConnected(self.state()));
        }

        match rx.await {
            Ok(result) => result,
            // The worker went away without answering.
            Err(_) => Err(ClientError::NotConnected(self.state())),
        }
    }

    /// Callback flavor of [`execute`](Client::execute).
    ///
    /// Issues `op` from a new task and hands the resolution to `callback`,
    /// exactly once.
    pub fn execute_then<F>(&self, op: Operation, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Reply, ClientError>) + Send + 'static,
    {
        let client = self.clone();

        tokio::spawn(async move {
            let result = client.execute(op).await;
            callback(result);
        })
    }

    /// Releases the connection.
    ///
    /// Requests issued before `close` are still answered; later ones resolve
    /// with `NotConnected(Closed)`. Closing twice is a no-op.
    pub async fn close(&self) {
        let (resp, rx) = oneshot::channel();

        if self.requests.send(Message::Close { resp }).await.is_err() {
            return;
        }

        let _ = rx.await;
    }
}
