use std::sync::Arc;

use axum::{debug_handler, extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{messenger::Messenger, AppResult};

#[derive(Debug, Deserialize, Serialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub receiver: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub chat_id: Uuid,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn send_message(
    State(messenger): State<Arc<Messenger>>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SentMessage>)> {
    let Json(SendMessageRequest { sender, receiver, content }) = payload?;

    let chat_id = messenger.send(&sender, &receiver, &content)?;

    tracing::debug!(%chat_id, %sender, %receiver, "message sent");
    Ok((StatusCode::CREATED, Json(SentMessage { chat_id })))
}
