use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures_util::{stream::SplitStream, SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{error::Error, hub::{Envelope, Hub}, messenger::Messenger, AppResult};

#[derive(Deserialize)]
pub(crate) struct LiveQuery {
    #[serde(rename = "userID", default)]
    user_id: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn live(
    Query(LiveQuery { user_id }): Query<LiveQuery>,
    State(hub): State<Arc<Hub>>,
    State(messenger): State<Arc<Messenger>>,

    ws: WebSocketUpgrade,
) -> AppResult<Response> {
    if user_id.is_empty() {
        return Err(Error::Missing("userID").into());
    }

    Ok(ws
        .on_upgrade(move |socket| serve(socket, user_id, hub, messenger))
        .into_response())
}

async fn serve(socket: WebSocket, handle: String, hub: Arc<Hub>, messenger: Arc<Messenger>) {
    let (mut sender, receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Envelope>();

    if !hub.register(&handle, tx) {
        // Someone else holds this handle: this session may send but never receives.
        receive(receiver, &handle, &messenger).await;
        return;
    }

    let mut forward_task = tokio::spawn(async move {
        while let Some(envelope) = rx.recv().await {
            let text = match serde_json::to_string(&envelope) {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!(error = %err, "failed to encode message");
                    continue;
                }
            };

            if let Err(err) = sender.send(Message::Text(text.into())).await {
                tracing::error!(to = %envelope.to, error = %err, "failed to write message");
            }
        }

        let _ = sender.send(Message::Close(None)).await;
    });

    let mut receive_task = {
        let handle = handle.clone();
        tokio::spawn(async move { receive(receiver, &handle, &messenger).await })
    };

    // The forwarder only stops once the hub lets go of our channel.
    tokio::select! {
        _ = &mut forward_task => receive_task.abort(),
        _ = &mut receive_task => forward_task.abort(),
    };

    hub.unregister(&handle);
}

async fn receive(mut receiver: SplitStream<WebSocket>, handle: &str, messenger: &Messenger) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(err) => {
                tracing::warn!(handle, error = %err, "live connection failed");
                break;
            }
        };

        let envelope = match msg {
            Message::Text(text) => serde_json::from_str::<Envelope>(&text),
            Message::Binary(data) => serde_json::from_slice::<Envelope>(&data),
            Message::Close(_) => break,
            Message::Ping(_) | Message::Pong(_) => continue,
        };

        match envelope {
            Ok(envelope) => messenger.relay(envelope),
            Err(err) => tracing::warn!(handle, error = %err, "ignoring malformed message"),
        }
    }

    tracing::info!(handle, "stopped listening to live connection");
}
