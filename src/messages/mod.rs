mod send;
mod ws;

use axum::{routing::{get, post}, Router};

pub use send::{SendMessageRequest, SentMessage};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(send::send_message))
        .route("/ws", get(ws::live))
}
