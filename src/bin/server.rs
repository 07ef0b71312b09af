//! store-server
//!
//! Runs the in-memory reference store until Ctrl-C.

use clap::Parser;
use dotenv::dotenv;
use log::{info, warn};
use tokio::net::TcpListener;
use tokio::signal;

use store_client::config::StoreConfig;
use store_client::error::StoreServerError;
use store_client::logger;
use store_client::server;

#[derive(Parser, Debug)]
#[clap(name = "store-server", version, author, about = "A small in-memory RESP store")]
struct Cli {
    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
pub async fn main() -> Result<(), StoreServerError> {
    let cli = init();
    let port = match cli.port {
        Some(port) => port,
        None => StoreConfig::from_env().map(|config| config.port).unwrap_or_else(|err| {
            warn!("{}, using the default port", err);
            StoreConfig::default().port
        }),
    };

    let listener = TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    info!("store server started at: :{}", port);

    server::run(listener, signal::ctrl_c()).await;

    Ok(())
}

fn init() -> Cli {
    dotenv().ok();
    logger::init();
    Cli::parse()
}
