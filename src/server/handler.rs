use log::{debug, error};
use tokio::net::TcpStream;

use crate::cmd::Command;
use crate::connection::connect::Connection;
use crate::error::StoreConnectionError;
use crate::server::shutdown::Shutdown;
use crate::storage::db::Db;

/// Serves one accepted socket until the peer hangs up or the server stops.
///
/// Errors only end this connection; they are logged, never returned to the
/// accept loop.
pub(crate) async fn serve(db: Db, socket: TcpStream, mut shutdown: Shutdown) {
    let mut connection = Connection::new(socket);

    if let Err(err) = answer_requests(&db, &mut connection, &mut shutdown).await {
        error!("connection error: {}", err);
    }
}

/// Requests are answered one at a time, in arrival order. A command that is
/// already being applied finishes before a shutdown takes effect.
async fn answer_requests(
    db: &Db,
    connection: &mut Connection,
    shutdown: &mut Shutdown,
) -> Result<(), StoreConnectionError> {
    while !shutdown.is_shutdown() {
        let frame = tokio::select! {
            res = connection.read_frame() => match res? {
                Some(frame) => frame,
                None => {
                    debug!("peer closed the socket");
                    return Ok(());
                }
            },
            _ = shutdown.recv() => return Ok(()),
        };

        let cmd = Command::from_frame(frame)?;
        debug!("received command {}: {:?}", cmd.get_name(), cmd);

        cmd.apply(db, connection).await?;
    }

    Ok(())
}
