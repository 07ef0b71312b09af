use std::fmt;

/// Lifecycle of the single connection owned by a `Client`.
///
/// `Connecting` is the initial state. `Failed` and `Closed` are never left:
/// there is no reconnection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    /// The handshake failed or the transport broke, with the error message.
    Failed(String),
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConnectionState::Connecting => "connecting".fmt(fmt),
            ConnectionState::Connected => "connected".fmt(fmt),
            ConnectionState::Failed(msg) => write!(fmt, "failed: {}", msg),
            ConnectionState::Closed => "closed".fmt(fmt),
        }
    }
}
