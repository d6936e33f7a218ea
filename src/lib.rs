pub mod appresult;
pub mod chats;
pub mod config;
pub mod error;
pub mod hub;
pub mod log;
pub mod messages;
pub mod messenger;
pub mod store;
pub mod users;

use std::sync::Arc;

use axum::{Router, extract::FromRef};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;

use hub::Hub;
use messenger::Messenger;
use store::{ChatIndex, MessageLog, UserDirectory};

/// Everything a request handler may touch. Built once at startup.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub users: Arc<UserDirectory>,
    pub chats: Arc<ChatIndex>,
    pub messages: Arc<MessageLog>,
    pub hub: Arc<Hub>,
    pub messenger: Arc<Messenger>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let users = Arc::new(UserDirectory::new());
        let chats = Arc::new(ChatIndex::new());
        let messages = Arc::new(MessageLog::new());
        let hub = Arc::new(Hub::new());
        let messenger = Arc::new(Messenger::new(
            users.clone(),
            chats.clone(),
            messages.clone(),
            hub.clone(),
            config.unified_delivery,
        ));

        AppState { users, chats, messages, hub, messenger }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(users::router())
        .merge(messages::router())
        .nest("/chats", chats::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
