//! In-memory tables. Each one owns a single lock and nothing is persisted.

mod chats;
mod messages;
mod users;

pub use chats::{Chat, ChatIndex};
pub use messages::MessageLog;
pub use users::UserDirectory;
