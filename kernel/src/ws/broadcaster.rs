//! Fan-out of game events to every connected client.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::ws::types::{BroadcastMessage, WsError};

const BROADCAST_CAPACITY: usize = 256;

/// Broadcasts messages to all subscribers.
#[derive(Clone)]
pub struct Broadcaster {
    sender: broadcast::Sender<BroadcastMessage>,
    client_count: Arc<AtomicUsize>,
}

impl Broadcaster {
    /// Creates a new broadcaster with an empty channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            sender,
            client_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribes a new receiver. Only messages sent afterwards are seen.
    #[must_use]
    pub fn subscribe(&self) -> BroadcastReceiver {
        self.client_count.fetch_add(1, Ordering::SeqCst);
        debug!(client_count = self.client_count(), "Client subscribed");
        BroadcastReceiver {
            inner: self.sender.subscribe(),
            client_count: Arc::clone(&self.client_count),
        }
    }

    /// Sends a message to all current subscribers. Having none is not an error.
    pub fn broadcast(&self, message: impl Into<BroadcastMessage>) {
        if let Ok(receiver_count) = self.sender.send(message.into()) {
            trace!(receiver_count, "Broadcast sent");
        } else {
            trace!("Broadcast dropped, no subscribers");
        }
    }

    /// Returns the number of live subscribers.
    #[must_use]
    pub fn client_count(&self) -> usize {
        self.client_count.load(Ordering::SeqCst)
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half handed to a single subscriber.
pub struct BroadcastReceiver {
    inner: broadcast::Receiver<BroadcastMessage>,
    client_count: Arc<AtomicUsize>,
}

impl BroadcastReceiver {
    /// Receives the next broadcast message.
    ///
    /// # Errors
    /// Returns `WsError::ChannelClosed` once the broadcaster is gone and
    /// `WsError::Lagged` if messages were skipped; the receiver stays usable
    /// after a lag.
    pub async fn recv(&mut self) -> Result<BroadcastMessage, WsError> {
        self.inner.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => WsError::ChannelClosed,
            broadcast::error::RecvError::Lagged(count) => {
                warn!(skipped = count, "Receiver lagged");
                WsError::Lagged(count)
            }
        })
    }
}

impl Drop for BroadcastReceiver {
    fn drop(&mut self) {
        self.client_count.fetch_sub(1, Ordering::SeqCst);
        debug!(
            client_count = self.client_count.load(Ordering::SeqCst),
            "Client unsubscribed"
        );
    }
}
