pub use crate::client::cli::Client;
pub use crate::client::operation::{Operation, Reply};
pub use crate::client::state::ConnectionState;
use crate::config::StoreConfig;

pub mod cli;
pub mod cmd;
mod operation;
mod session;
mod state;
mod worker;

/// Connect to the store located at `addr`, a `host:port` string.
///
/// Returns without waiting for the handshake. The outcome is reported through
/// [`Client::state`], [`Client::watch_state`] and [`Client::wait_connected`];
/// requests issued in the meantime are held until the connection is ready.
///
/// # Examples
///
/// ```no_run
/// #[tokio::main]
/// async fn main() {
///     let client = store_client::client::connect("localhost:6379");
///
///     match client.wait_connected().await {
///         Ok(()) => println!("Redis client connected to the server"),
///         Err(err) => println!("Redis client not connected to the server: {}", err),
///     }
/// }
/// ```
pub fn connect(addr: impl Into<String>) -> Client {
    Client::connect(addr)
}

/// Connect to the store described by `config`.
pub fn connect_with(config: &StoreConfig) -> Client {
    Client::connect(config.addr())
}
