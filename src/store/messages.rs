use std::collections::HashMap;

use parking_lot::RwLock;
use uuid::Uuid;

/// Append-only message content, per chat.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: RwLock<HashMap<Uuid, Vec<String>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        tracing::info!(store = "message", "created store");
        Self::default()
    }

    /// Content is stored as given, empty strings included.
    pub fn append(&self, chat_id: Uuid, content: &str) {
        self.messages
            .write()
            .entry(chat_id)
            .or_default()
            .push(content.to_owned());

        tracing::debug!(%chat_id, "message appended");
    }

    pub fn list(&self, chat_id: Uuid) -> Vec<String> {
        self.messages
            .read()
            .get(&chat_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self, chat_id: Uuid) -> usize {
        self.messages.read().get(&chat_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;

    #[test]
    fn appends_keep_order() {
        let log = MessageLog::new();
        let chat_id = Uuid::now_v7();

        log.append(chat_id, "m1");
        log.append(chat_id, "m2");
        log.append(chat_id, "");

        assert_eq!(log.list(chat_id), vec!["m1", "m2", ""]);
        assert_eq!(log.count(chat_id), 3);
    }

    #[test]
    fn unknown_chat_is_empty() {
        let log = MessageLog::new();
        log.append(Uuid::now_v7(), "elsewhere");

        assert!(log.list(Uuid::now_v7()).is_empty());
        assert_eq!(log.count(Uuid::nil()), 0);
    }

    #[test]
    fn chats_do_not_mix() {
        let log = Arc::new(MessageLog::new());
        let chat_ids: Vec<Uuid> = (0..4).map(|_| Uuid::now_v7()).collect();

        chat_ids
            .iter()
            .map(|&chat_id| {
                let log = log.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        log.append(chat_id, &format!("{chat_id}:{i}"));
                    }
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .for_each(|handle| handle.join().unwrap());

        for chat_id in chat_ids {
            let expected: Vec<String> = (0..100).map(|i| format!("{chat_id}:{i}")).collect();
            assert_eq!(log.list(chat_id), expected);
        }
    }
}
