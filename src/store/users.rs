use std::collections::HashSet;

use parking_lot::RwLock;

use crate::error::{Error, Result};

/// Registered phone numbers.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashSet<String>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        tracing::info!(store = "user", "created store");
        Self::default()
    }

    pub fn register(&self, handle: &str) -> Result<()> {
        if !self.users.write().insert(handle.to_owned()) {
            return Err(Error::AlreadyRegistered(handle.to_owned()));
        }

        tracing::debug!(handle, "user registered");
        Ok(())
    }

    pub fn is_registered(&self, handle: &str) -> bool {
        self.users.read().contains(handle)
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
