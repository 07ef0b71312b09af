//! Hash flavor of the school script.
//!
//! Stores six fields under `HolbertonSchools`, waiting for each write to be
//! acknowledged, then prints the whole hash.
//!
//!     cargo run --bin store-server
//!     cargo run --example school_hash

use store_client::client;
use store_client::error::ClientError;

const HASH_KEY: &str = "HolbertonSchools";

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

    let schools = [
        ("Portland", 50),
        ("Seattle", 80),
        ("New York", 20),
        ("Bogota", 20),
        ("Cali", 40),
        ("Paris", 2),
    ];

    for (field, value) in schools.iter() {
        match client.hset(HASH_KEY, field, value).await {
            Ok(reply) => println!("Reply: {}", reply),
            Err(err) => eprintln!("Error setting {}: {}", field, err),
        }
    }

    let fields = client.hgetall(HASH_KEY).await?;
    println!("{:#?}", fields);

    client.close().await;
    Ok(())
}
