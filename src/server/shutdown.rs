use tokio::sync::broadcast;

/// Listens for the server shutdown signal.
///
/// The signal is sent once through a `broadcast::Receiver`; after it has been
/// seen, `is_shutdown` stays `true`.
#[derive(Debug)]
pub(crate) struct Shutdown {
    shutdown: bool,

    notify: broadcast::Receiver<()>,
}

impl Shutdown {
    pub(crate) fn new(notify: broadcast::Receiver<()>) -> Shutdown {
        Shutdown {
            shutdown: false,
            notify,
        }
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    /// Receive the shutdown notice, waiting if necessary.
    pub(crate) async fn recv(&mut self) {
        if self.shutdown {
            return;
        }

        // Dropping the sender also counts as the signal.
        let _ = self.notify.recv().await;

        self.shutdown = true;
    }
}
