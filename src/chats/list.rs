use std::sync::Arc;

use axum::{debug_handler, extract::{Path, Query, State}, Json};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::{Chat, ChatIndex, MessageLog};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListChatsQuery {
    #[serde(default)]
    phone_number: String,
}

/// Public view of a chat.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub id: Uuid,
    pub participants: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Chat> for ChatResponse {
    fn from(Chat { id, participants, created_at }: Chat) -> Self {
        ChatResponse {
            id,
            participants: participants.into(),
            created_at,
        }
    }
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn list_chats(
    Query(ListChatsQuery { phone_number }): Query<ListChatsQuery>,
    State(chats): State<Arc<ChatIndex>>,
) -> Json<Vec<ChatResponse>> {
    let result: Vec<ChatResponse> = chats
        .chats_for_user(&phone_number)
        .into_iter()
        .map(ChatResponse::from)
        .collect();

    tracing::debug!(handle = %phone_number, count = result.len(), "listed chats");
    Json(result)
}

/// Ids that are not valid UUIDs name no chat, so they list nothing.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn list_messages(
    Path(id): Path<String>,
    State(messages): State<Arc<MessageLog>>,
) -> Json<Vec<String>> {
    let result = match Uuid::parse_str(&id) {
        Ok(chat_id) => messages.list(chat_id),
        Err(_) => Vec::new(),
    };

    tracing::debug!(chat_id = %id, count = result.len(), "listed messages");
    Json(result)
}
