pub mod client;
pub mod cmd;
pub mod config;
pub mod consts;
pub mod error;
pub mod logger;
pub mod server;
mod storage;
pub(crate) mod connection;
