use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a message a handle was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Sender,
    Receiver,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Role::*;
        match self {
            Sender => write!(f, "sender"),
            Receiver => write!(f, "receiver"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("phone number {0} already registered")]
    AlreadyRegistered(String),

    #[error("{role} phone number {handle} not registered")]
    NotRegistered { role: Role, handle: String },

    #[error("{0} cannot open a chat with themselves")]
    SelfChat(String),
}
