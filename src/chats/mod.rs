mod list;

pub use list::ChatResponse;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_chats))
        .route("/{id}/messages", get(list::list_messages))
}
