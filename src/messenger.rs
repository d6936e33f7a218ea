use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    error::{Error, Result, Role},
    hub::{Envelope, Hub},
    store::{ChatIndex, MessageLog, UserDirectory},
};

/// Entry point for every message, whether it arrives over HTTP or a live channel.
///
/// With `unified_delivery` off, HTTP sends are only stored and live envelopes are
/// only forwarded. With it on, both paths store first and then forward, so the
/// history and what connected users saw cannot drift apart.
#[derive(Debug)]
pub struct Messenger {
    users: Arc<UserDirectory>,
    chats: Arc<ChatIndex>,
    messages: Arc<MessageLog>,
    hub: Arc<Hub>,
    unified_delivery: bool,
    // Held across validate, resolve and append.
    send_lock: Mutex<()>,
}

impl Messenger {
    pub fn new(
        users: Arc<UserDirectory>,
        chats: Arc<ChatIndex>,
        messages: Arc<MessageLog>,
        hub: Arc<Hub>,
        unified_delivery: bool,
    ) -> Self {
        tracing::info!(unified_delivery, "created messenger");
        Self {
            users,
            chats,
            messages,
            hub,
            unified_delivery,
            send_lock: Mutex::new(()),
        }
    }

    /// Stores a message between two registered users and returns its chat.
    pub fn send(&self, sender: &str, receiver: &str, content: &str) -> Result<Uuid> {
        let chat_id = self.persist(sender, receiver, content)?;

        if self.unified_delivery {
            self.hub.deliver(&Envelope {
                from: sender.to_owned(),
                to: receiver.to_owned(),
                content: content.to_owned(),
            });
        }

        Ok(chat_id)
    }

    /// Forwards an envelope received on a live channel.
    pub fn relay(&self, envelope: Envelope) {
        if self.unified_delivery {
            if let Err(err) = self.persist(&envelope.from, &envelope.to, &envelope.content) {
                tracing::warn!(from = %envelope.from, to = %envelope.to, error = %err, "live message rejected");
                return;
            }
        }

        self.hub.deliver(&envelope);
    }

    fn persist(&self, sender: &str, receiver: &str, content: &str) -> Result<Uuid> {
        if sender.is_empty() {
            return Err(Error::Missing("sender"));
        }
        if receiver.is_empty() {
            return Err(Error::Missing("receiver"));
        }
        if content.is_empty() {
            return Err(Error::Missing("content"));
        }
        if sender == receiver {
            return Err(Error::SelfChat(sender.to_owned()));
        }

        let _guard = self.send_lock.lock();

        for (role, handle) in [(Role::Sender, sender), (Role::Receiver, receiver)] {
            if !self.users.is_registered(handle) {
                return Err(Error::NotRegistered { role, handle: handle.to_owned() });
            }
        }

        let chat_id = self.chats.get_or_create(sender, receiver)?;
        self.messages.append(chat_id, content);

        tracing::debug!(%chat_id, sender, receiver, "message stored");
        Ok(chat_id)
    }
}
