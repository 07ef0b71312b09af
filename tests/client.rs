use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use store_client::client::{self, ConnectionState, Operation, Reply};
use store_client::error::ClientError;
use store_client::server;

/// A running reference store. Send on `shutdown` to stop it.
struct TestServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

async fn start_server() -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move { server::run(listener, rx).await });

    TestServer {
        addr,
        shutdown,
        handle,
    }
}

/// An address nothing listens on.
async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

const BOUND: Duration = Duration::from_secs(5);

#[tokio::test]
async fn set_then_get_returns_the_value() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    assert_eq!(client.set("Holberton", "100").await, Ok("OK".to_string()));
    assert_eq!(client.get("Holberton").await, Ok(Some("100".to_string())));
}

#[tokio::test]
async fn numeric_values_are_stored_as_strings() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    client.set("HolbertonSanFrancisco", 100).await.unwrap();
    assert_eq!(
        client.get("HolbertonSanFrancisco").await.unwrap().as_deref(),
        Some("100")
    );
}

#[tokio::test]
async fn missing_key_is_none_not_an_error() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    assert_eq!(client.get("Holberton").await, Ok(None));
    assert_eq!(client.hgetall("HolbertonSchools").await, Ok(HashMap::new()));
}

#[tokio::test]
async fn hash_fields_written_in_sequence_are_all_read_back() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    let schools = [
        ("Portland", 50),
        ("Seattle", 80),
        ("New York", 20),
        ("Bogota", 20),
        ("Cali", 40),
        ("Paris", 2),
    ];
    for (field, value) in schools.iter() {
        assert_eq!(client.hset("HolbertonSchools", field, value).await, Ok(1));
    }

    let expected: HashMap<String, String> = schools
        .iter()
        .map(|(field, value)| (field.to_string(), value.to_string()))
        .collect();
    assert_eq!(client.hgetall("HolbertonSchools").await, Ok(expected));
}

#[tokio::test]
async fn concurrent_writes_from_clones_all_land() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.hset("counters", &format!("f{}", i), i).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), Ok(1));
    }

    let fields = client.hgetall("counters").await.unwrap();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields.get("f5").map(String::as_str), Some("5"));
}

#[tokio::test]
async fn repeated_writes_keep_the_last_value() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    for _ in 0..3 {
        client.set("Holberton", "100").await.unwrap();
        client.hset("HolbertonSchools", "Cali", 40).await.unwrap();
    }
    assert_eq!(client.hset("HolbertonSchools", "Cali", 40).await, Ok(0));

    assert_eq!(client.get("Holberton").await.unwrap().as_deref(), Some("100"));
    let fields = client.hgetall("HolbertonSchools").await.unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["Cali"], "40");
}

#[tokio::test]
async fn requests_issued_while_connecting_wait_for_the_handshake() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    // No `wait_connected`: the request is queued until the socket is up.
    let reply = client.execute(Operation::set("Holberton", "100")).await;
    assert_eq!(reply, Ok(Reply::Ack("OK".to_string())));
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[tokio::test]
async fn store_errors_pass_through_and_keep_the_connection() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    client.set("Holberton", "100").await.unwrap();

    match client.hset("Holberton", "Paris", 2).await {
        Err(ClientError::Store(msg)) => assert!(msg.starts_with("WRONGTYPE"), "{}", msg),
        other => panic!("unexpected result {:?}", other),
    }

    assert_eq!(client.state(), ConnectionState::Connected);
    assert_eq!(client.get("Holberton").await.unwrap().as_deref(), Some("100"));
}

#[tokio::test]
async fn empty_key_is_rejected_locally_only_for_set() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    assert_eq!(client.set("", "100").await, Err(ClientError::InvalidKey));

    // Reads go to the store, which has nothing under the empty key.
    assert_eq!(client.get("").await, Ok(None));
    assert_eq!(client.hgetall("").await, Ok(HashMap::new()));
    assert_eq!(client.state(), ConnectionState::Connected);
}

#[tokio::test]
async fn failed_connection_is_reported_before_an_invalid_key() {
    let client = client::connect(unused_addr().await.to_string());

    let result = timeout(BOUND, client.set("", "1")).await.unwrap();
    assert!(
        matches!(result, Err(ClientError::NotConnected(ConnectionState::Failed(_)))),
        "{:?}",
        result
    );
}

#[tokio::test]
async fn failed_handshake_resolves_requests_without_hanging() {
    let addr = unused_addr().await;
    let client = client::connect(addr.to_string());

    let connected = timeout(BOUND, client.wait_connected()).await.unwrap();
    assert!(matches!(connected, Err(ClientError::Connection(_))));
    assert!(matches!(client.state(), ConnectionState::Failed(_)));

    let result = timeout(BOUND, client.get("Holberton")).await.unwrap();
    assert!(matches!(
        result,
        Err(ClientError::NotConnected(ConnectionState::Failed(_)))
    ));

    // No automatic reconnection.
    assert!(matches!(client.state(), ConnectionState::Failed(_)));
}

#[tokio::test]
async fn request_issued_during_a_failing_handshake_resolves() {
    let client = client::connect(unused_addr().await.to_string());

    // Issued right away, while the state is still `Connecting`.
    let result = timeout(BOUND, client.get("Holberton")).await.unwrap();
    assert!(
        matches!(result, Err(ClientError::NotConnected(ConnectionState::Failed(_)))),
        "{:?}",
        result
    );
}

#[tokio::test]
async fn observer_sees_the_handshake_outcome() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());

    let (tx, rx) = oneshot::channel();
    let mut tx = Some(tx);
    client.observe(move |state| {
        if let Some(tx) = tx.take() {
            let _ = tx.send(state.clone());
        }
    });

    let first = timeout(BOUND, rx).await.unwrap().unwrap();
    assert_eq!(first, ConnectionState::Connected);
}

#[tokio::test]
async fn observer_sees_a_failed_handshake() {
    let client = client::connect(unused_addr().await.to_string());

    let mut states = client.watch_state();
    let failed = timeout(BOUND, async {
        loop {
            if let ConnectionState::Failed(msg) = states.borrow_and_update().clone() {
                return msg;
            }
            states.changed().await.unwrap();
        }
    })
    .await
    .unwrap();

    assert!(!failed.is_empty());
}

#[tokio::test]
async fn callback_receives_the_resolution_once() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());
    client.set("Holberton", "100").await.unwrap();

    let (tx, rx) = oneshot::channel();
    let handle = client.execute_then(Operation::get("Holberton"), move |result| {
        let _ = tx.send(result);
    });

    handle.await.unwrap();
    assert_eq!(
        rx.await.unwrap(),
        Ok(Reply::Value(Some("100".to_string())))
    );
}

#[tokio::test]
async fn closed_client_rejects_new_requests() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());
    let other = client.clone();

    client.set("Holberton", "100").await.unwrap();
    client.close().await;

    assert_eq!(client.state(), ConnectionState::Closed);
    let result = timeout(BOUND, other.get("Holberton")).await.unwrap();
    assert_eq!(
        result,
        Err(ClientError::NotConnected(ConnectionState::Closed))
    );
    assert_eq!(
        client.wait_connected().await,
        Err(ClientError::NotConnected(ConnectionState::Closed))
    );

    // Closing again does nothing.
    timeout(BOUND, client.close()).await.unwrap();
}

#[tokio::test]
async fn close_racing_requests_from_clones_resolves_every_request() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());
    client.wait_connected().await.unwrap();

    let requests: Vec<_> = (0..16)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move { client.set(&format!("k{}", i), i).await })
        })
        .collect();
    let closer = {
        let client = client.clone();
        tokio::spawn(async move { client.close().await })
    };

    for request in requests {
        let result = timeout(BOUND, request).await.unwrap().unwrap();
        match result {
            Ok(ack) => assert_eq!(ack, "OK"),
            Err(ClientError::NotConnected(ConnectionState::Closed)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    timeout(BOUND, closer).await.unwrap().unwrap();
    assert_eq!(client.state(), ConnectionState::Closed);
}

#[tokio::test]
async fn broken_transport_fails_the_connection() {
    let server = start_server().await;
    let client = client::connect(server.addr.to_string());
    client.wait_connected().await.unwrap();

    server.shutdown.send(()).unwrap();
    server.handle.await.unwrap();

    let first = timeout(BOUND, client.get("Holberton")).await.unwrap();
    assert!(matches!(first, Err(ClientError::Connection(_))), "{:?}", first);
    assert!(matches!(client.state(), ConnectionState::Failed(_)));

    let second = timeout(BOUND, client.get("Holberton")).await.unwrap();
    assert!(matches!(
        second,
        Err(ClientError::NotConnected(ConnectionState::Failed(_)))
    ));
}

#[tokio::test]
async fn two_clients_see_each_others_writes() {
    let server = start_server().await;
    let writer = client::connect(server.addr.to_string());
    let reader = client::connect(server.addr.to_string());

    writer.hset("HolbertonSchools", "Bogota", 20).await.unwrap();
    let fields = reader.hgetall("HolbertonSchools").await.unwrap();
    assert_eq!(fields.get("Bogota").map(String::as_str), Some("20"));
}
