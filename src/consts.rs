/// Default port that a store server listens on.
///
/// Used if no port is specified.
pub const DEFAULT_PORT: u16 = 6379;

/// Default host the client connects to.
pub const DEFAULT_HOST: &str = "127.0.0.1";


/// Capacity of the queue between `Client` handles and the task owning the
/// socket. Callers wait for a free slot once it fills up.
pub const REQUEST_QUEUE_SIZE: usize = 32;
