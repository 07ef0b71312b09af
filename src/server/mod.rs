//! Reference store server
//!
//! Serves `GET`, `SET`, `HSET` and `HGETALL` from memory, one task per
//! connection. It exists to give the client something to talk to in tests
//! and demos, so it keeps no limits and does not retry a failed accept.

use std::future::Future;

use log::{error, info};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinSet;

use crate::server::shutdown::Shutdown;
use crate::storage::db::Db;

mod handler;
pub(crate) mod shutdown;

/// Run the store server.
///
/// Accepts connections from `listener` until `shutdown` completes or
/// accepting fails, then tells every connection to stop and waits for them.
///
/// `tokio::signal::ctrl_c()` can be used as the `shutdown` argument.
pub async fn run(listener: TcpListener, shutdown: impl Future) {
    match listener.local_addr() {
        Ok(addr) => info!("store server listening on: {}", addr),
        Err(err) => error!("store server could not read its local address: {}", err),
    }

    let db = Db::new();
    let (notify_shutdown, _) = broadcast::channel::<()>(1);
    let mut connections = JoinSet::new();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((socket, peer)) => {
                    info!("accepted connection from {}", peer);
                    let stop = Shutdown::new(notify_shutdown.subscribe());
                    connections.spawn(handler::serve(db.clone(), socket, stop));
                }
                Err(err) => {
                    error!("failed to accept: {}", err);
                    break;
                }
            },
            _ = &mut shutdown => {
                info!("server is shutting down");
                break;
            }
        }
    }

    // Closing the channel is the stop signal for every `Shutdown`.
    drop(notify_shutdown);
    while connections.join_next().await.is_some() {}
}
