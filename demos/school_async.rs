//! Awaited flavor of the school set/get script.
//!
//!     cargo run --bin store-server
//!     cargo run --example school_async

use store_client::client::{self, Client};
use store_client::error::ClientError;

async fn set_new_school(client: &Client, school: &str, value: &str) {
    match client.set(school, value).await {
        Ok(reply) => println!("Reply: {}", reply),
        Err(err) => eprintln!("Error setting {}: {}", school, err),
    }
}

async fn display_school_value(client: &Client, school: &str) {
    match client.get(school).await {
        Ok(value) => println!("{}", value.as_deref().unwrap_or("null")),
        Err(err) => eprintln!("Error getting {}: {}", school, err),
    }
}

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let client = client::connect("127.0.0.1:6379");

    match client.wait_connected().await {
        Ok(()) => println!("Redis client connected to the server"),
        Err(err) => {
            println!("Redis client not connected to the server: {}", err);
            return Err(err);
        }
    }

    display_school_value(&client, "Holberton").await;
    set_new_school(&client, "HolbertonSanFrancisco", "100").await;
    display_school_value(&client, "HolbertonSanFrancisco").await;

    client.close().await;
    Ok(())
}
