use std::collections::HashMap;

use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A conversation between two distinct handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: Uuid,
    /// In first-contact order: whoever sent first, then the receiver.
    pub participants: [String; 2],
    pub created_at: OffsetDateTime,
}

/// Order-independent key for a pair of handles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PairKey(String, String);

impl PairKey {
    fn new(a: &str, b: &str) -> Self {
        if a <= b {
            PairKey(a.to_owned(), b.to_owned())
        } else {
            PairKey(b.to_owned(), a.to_owned())
        }
    }
}

#[derive(Debug, Default)]
struct ChatTable {
    chats: Vec<Chat>,
    by_pair: HashMap<PairKey, usize>,
    by_id: HashMap<Uuid, usize>,
    by_user: HashMap<String, Vec<usize>>,
}

/// Resolves unordered pairs of handles to a single chat, creating it on first contact.
#[derive(Debug, Default)]
pub struct ChatIndex {
    table: RwLock<ChatTable>,
}

impl ChatIndex {
    pub fn new() -> Self {
        tracing::info!(store = "chat", "created store");
        Self::default()
    }

    /// Returns the chat shared by `a` and `b`, in either order.
    pub fn get_or_create(&self, a: &str, b: &str) -> Result<Uuid> {
        if a == b {
            return Err(Error::SelfChat(a.to_owned()));
        }

        let key = PairKey::new(a, b);
        {
            let table = self.table.read();
            if let Some(&idx) = table.by_pair.get(&key) {
                return Ok(table.chats[idx].id);
            }
        }

        let mut table = self.table.write();
        // Another caller may have created it between the two locks.
        if let Some(&idx) = table.by_pair.get(&key) {
            return Ok(table.chats[idx].id);
        }

        let chat = Chat {
            id: Uuid::now_v7(),
            participants: [a.to_owned(), b.to_owned()],
            created_at: now_millis(),
        };
        let id = chat.id;
        let idx = table.chats.len();

        table.chats.push(chat);
        table.by_pair.insert(key, idx);
        table.by_id.insert(id, idx);
        table.by_user.entry(a.to_owned()).or_default().push(idx);
        table.by_user.entry(b.to_owned()).or_default().push(idx);

        tracing::debug!(chat_id = %id, a, b, "chat created");
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Option<Chat> {
        let table = self.table.read();
        table.by_id.get(&id).map(|&idx| table.chats[idx].clone())
    }

    /// Every chat `handle` takes part in, oldest first. Unknown handles have none.
    pub fn chats_for_user(&self, handle: &str) -> Vec<Chat> {
        let table = self.table.read();
        let Some(indices) = table.by_user.get(handle) else {
            return Vec::new();
        };

        indices.iter().map(|&idx| table.chats[idx].clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.table.read().chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn now_millis() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}
