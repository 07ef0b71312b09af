//! Callback flavor of the school set/get script.
//!
//! Reads `Holberton`, writes `HolbertonSanFrancisco`, then reads it back,
//! each result handed to a callback. You can test this out by running:
//!
//!     cargo run --bin store-server
//!
//! And then in another terminal run:
//!
//!     cargo run --example school_callbacks

use store_client::client::{self, ConnectionState, Operation, Reply};
use store_client::error::ClientError;

fn display_value(school: &'static str) -> impl FnOnce(Result<Reply, ClientError>) {
    move |result| match result {
        Ok(Reply::Value(value)) => println!("{}", value.as_deref().unwrap_or("null")),
        Ok(reply) => println!("Unexpected reply for {}: {:?}", school, reply),
        Err(err) => eprintln!("Error getting {}: {}", school, err),
    }
}

fn print_set(school: &'static str) -> impl FnOnce(Result<Reply, ClientError>) {
    move |result| match result {
        Ok(Reply::Ack(ack)) => println!("Reply: {}", ack),
        Ok(reply) => println!("Unexpected reply for {}: {:?}", school, reply),
        Err(err) => eprintln!("Error setting {}: {}", school, err),
    }
}

#[tokio::main]
async fn main() {
    let client = client::connect("127.0.0.1:6379");

    let observer = client.observe(|state| match state {
        ConnectionState::Connected => println!("Redis client connected to the server"),
        ConnectionState::Failed(msg) => {
            println!("Redis client not connected to the server: {}", msg)
        }
        _ => {}
    });

    // Each callback runs on its own task, so the three requests are awaited
    // one after another to keep the read after the write.
    client
        .execute_then(Operation::get("Holberton"), display_value("Holberton"))
        .await
        .ok();
    client
        .execute_then(
            Operation::set("HolbertonSanFrancisco", "100"),
            print_set("HolbertonSanFrancisco"),
        )
        .await
        .ok();
    client
        .execute_then(
            Operation::get("HolbertonSanFrancisco"),
            display_value("HolbertonSanFrancisco"),
        )
        .await
        .ok();

    client.close().await;
    observer.await.ok();
}
