//! store-cli
//!
//! Issues a single command against a store and prints the reply. The target
//! comes from `STORE_HOST` / `STORE_PORT`, overridden by `--hostname` and
//! `--port`.

use std::process;

use clap::Parser;
use dotenv::dotenv;
use log::{debug, error};

use store_client::client::cmd::Command;
use store_client::client::{self, Operation, Reply};
use store_client::config::StoreConfig;
use store_client::error::ClientError;
use store_client::logger;

#[derive(Parser, Debug)]
#[clap(name = "store-cli", version, author, about = "Issue store commands")]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(name = "hostname", long)]
    host: Option<String>,

    #[clap(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    logger::init();

    let cli = Cli::parse();
    debug!("get cli: {:?}", cli);

    let mut config = match StoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let client = client::connect_with(&config);

    let result = match client.wait_connected().await {
        Ok(()) => client.execute(operation(cli.command)).await,
        Err(err) => Err(err),
    };
    client.close().await;

    match result {
        Ok(reply) => print_reply(reply),
        Err(ClientError::Connection(msg)) => {
            println!("Redis client not connected to the server: {}", msg);
            process::exit(1);
        }
        Err(err) => {
            println!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn operation(command: Command) -> Operation {
    match command {
        Command::Get { key } => Operation::get(key),
        Command::Set { key, value } => Operation::set(key, value),
        Command::Hset { key, field, value } => Operation::hset(key, field, value),
        Command::Hgetall { key } => Operation::hgetall(key),
    }
}

fn print_reply(reply: Reply) {
    match reply {
        Reply::Ack(ack) => println!("Reply: {}", ack),
        Reply::Value(Some(value)) => println!("{}", value),
        Reply::Value(None) => println!("(nil)"),
        Reply::Added(added) => println!("Reply: {}", added),
        Reply::Fields(fields) => {
            let mut fields: Vec<_> = fields.into_iter().collect();
            fields.sort();
            for (field, value) in fields {
                println!("{}: {}", field, value);
            }
        }
    }
}
