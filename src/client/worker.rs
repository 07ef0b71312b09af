//! The task that owns the socket.
//!
//! `Client` handles never touch the connection. They send `Message`s over an
//! mpsc channel and the worker serves them one at a time, answering each on
//! its own oneshot channel. Connection state changes are published on a
//! watch channel.

use log::{debug, error, info};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, watch};

use crate::client::operation::{Operation, Reply};
use crate::client::session::Session;
use crate::client::state::ConnectionState;
use crate::connection::connect::Connection;
use crate::error::ClientError;

/// Delivers the resolution of one request.
pub(crate) type Responder<T> = oneshot::Sender<Result<T, ClientError>>;

#[derive(Debug)]
pub(crate) enum Message {
    Request {
        op: Operation,
        resp: Responder<Reply>,
    },
    /// Answered once the transport has been released.
    Close { resp: oneshot::Sender<()> },
}

/// Connects to `addr`, then serves `rx` until a `Close` message arrives or
/// every `Client` handle is dropped.
///
/// Requests wait in the channel while connecting, so none is answered before
/// the state reached `Connected`. After a failure every request is answered
/// with `NotConnected`.
pub(crate) async fn run(
    addr: String,
    mut rx: mpsc::Receiver<Message>,
    state: watch::Sender<ConnectionState>,
) {
    let mut session = match TcpStream::connect(addr.as_str()).await {
        Ok(socket) => {
            info!("client connected to the server at {}", addr);
            state.send_replace(ConnectionState::Connected);
            Some(Session::new(Connection::new(socket)))
        }
        Err(err) => {
            error!("client not connected to the server at {}: {}", addr, err);
            state.send_replace(ConnectionState::Failed(err.to_string()));
            None
        }
    };

    while let Some(message) = rx.recv().await {
        match message {
            Message::Request { op, resp } => {
                debug!("serving request: {:?}", op);

                // The connection state is checked first, so a dead client
                // answers `NotConnected` whatever the request looks like.
                let result = match session.as_mut() {
                    Some(session) => match op.validate() {
                        Ok(()) => session.execute(op).await,
                        Err(err) => Err(err),
                    },
                    None => {
                        let current = state.borrow().clone();
                        Err(ClientError::NotConnected(current))
                    }
                };

                // A broken transport leaves the stream in an unknown position,
                // so the session is dropped for good.
                if let Err(ClientError::Connection(msg)) = &result {
                    error!("connection to {} failed: {}", addr, msg);
                    state.send_replace(ConnectionState::Failed(msg.clone()));
                    session = None;
                }

                // The caller may have dropped its future.
                let _ = resp.send(result);
            }
            Message::Close { resp } => {
                close(&mut session, &state).await;

                // Requests queued behind `Close` are not sent.
                rx.close();
                while let Some(message) = rx.recv().await {
                    if let Message::Request { resp, .. } = message {
                        let _ = resp.send(Err(ClientError::NotConnected(ConnectionState::Closed)));
                    }
                }

                let _ = resp.send(());
                return;
            }
        }
    }

    debug!("all client handles dropped, releasing the connection");
    close(&mut session, &state).await;
}

async fn close(session: &mut Option<Session>, state: &watch::Sender<ConnectionState>) {
    if let Some(mut session) = session.take() {
        if let Err(err) = session.shutdown().await {
            debug!("error while shutting the connection down: {}", err);
        }
    }

    state.send_replace(ConnectionState::Closed);
    info!("client connection closed");
}
