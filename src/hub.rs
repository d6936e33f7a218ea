use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A message pushed over the live channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(alias = "From")]
    pub from: String,
    #[serde(alias = "To")]
    pub to: String,
    #[serde(alias = "Content")]
    pub content: String,
}

/// Write half of a live connection.
pub type Channel = mpsc::UnboundedSender<Envelope>;

/// Routes envelopes to whichever connection currently holds the addressee's handle.
///
/// A handle is bound to at most one channel. A second binding for the same
/// handle is ignored and the first one stays in place.
#[derive(Debug, Default)]
pub struct Hub {
    clients: RwLock<HashMap<String, Channel>>,
}

impl Hub {
    pub fn new() -> Self {
        tracing::info!("created hub");
        Self::default()
    }

    /// Returns `false` if `handle` was already bound.
    pub fn register(&self, handle: &str, channel: Channel) -> bool {
        let mut clients = self.clients.write();
        if clients.contains_key(handle) {
            tracing::warn!(handle, "client already registered");
            return false;
        }

        clients.insert(handle.to_owned(), channel);
        tracing::info!(handle, "client registered");
        true
    }

    /// Returns `false` if `handle` was not bound.
    pub fn unregister(&self, handle: &str) -> bool {
        if self.clients.write().remove(handle).is_none() {
            tracing::warn!(handle, "client not registered");
            return false;
        }

        tracing::info!(handle, "client unregistered");
        true
    }

    /// Drops the envelope if nobody holds `envelope.to`. Failed writes are logged, never retried.
    pub fn deliver(&self, envelope: &Envelope) {
        tracing::debug!(from = %envelope.from, to = %envelope.to, "delivering message");

        let Some(channel) = self.clients.read().get(&envelope.to).cloned() else {
            tracing::info!(to = %envelope.to, "recipient offline, message dropped");
            return;
        };

        if let Err(err) = channel.send(envelope.clone()) {
            tracing::error!(to = %envelope.to, error = %err, "failed to send message");
        }
    }

    pub fn is_online(&self, handle: &str) -> bool {
        self.clients.read().contains_key(handle)
    }

    pub fn online_count(&self) -> usize {
        self.clients.read().len()
    }

    /// Releases every binding. Connections see their channel close and hang up.
    pub fn shutdown(&self) {
        let closed = std::mem::take(&mut *self.clients.write()).len();
        tracing::info!(closed, "hub shut down");
    }
}
