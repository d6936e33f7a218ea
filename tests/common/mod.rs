#![allow(dead_code)]

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use phonechat::{app, hub::Envelope, AppState, Config};
use rand::Rng;
use serde_json::json;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream};

pub type LiveClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestApp {
    pub address: String,
    pub state: AppState,
    pub http: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Config::default()).await
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();

    let state = AppState::new(&config);
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address, state, http: reqwest::Client::new() }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.address, path)
    }

    pub async fn register(&self, phone_number: &str) -> reqwest::Response {
        self.http
            .post(self.url("/register"))
            .json(&json!({ "phoneNumber": phone_number }))
            .send()
            .await
            .unwrap()
    }

    pub async fn register_random(&self) -> String {
        let phone_number = random_phone_number();
        let response = self.register(&phone_number).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        phone_number
    }

    pub async fn send(&self, sender: &str, receiver: &str, content: &str) -> reqwest::Response {
        self.http
            .post(self.url("/messages"))
            .json(&json!({ "sender": sender, "receiver": receiver, "content": content }))
            .send()
            .await
            .unwrap()
    }

    pub async fn connect(&self, user_id: &str) -> LiveClient {
        let query = user_id.replace('+', "%2B");
        let (client, _) = connect_async(format!("ws://{}/ws?userID={}", self.address, query))
            .await
            .unwrap();

        // The binding is made after the upgrade completes on the server side.
        for _ in 0..100 {
            if self.state.hub.is_online(user_id) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        client
    }
}

/// Random E.164 phone number.
pub fn random_phone_number() -> String {
    let mut rng = rand::rng();
    let country_code: u32 = rng.random_range(1..=999);
    let local_number: u64 = rng.random_range(1_000_000_000..2_000_000_000);
    format!("+{country_code}{local_number}")
}

pub async fn send_envelope(client: &mut LiveClient, envelope: &Envelope) {
    let text = serde_json::to_string(envelope).unwrap();
    client.send(WsMessage::text(text)).await.unwrap();
}

/// Next envelope on `client`, or `None` if nothing arrives within `wait`.
pub async fn next_envelope(client: &mut LiveClient, wait: Duration) -> Option<Envelope> {
    loop {
        let frame = tokio::time::timeout(wait, client.next()).await.ok()??.ok()?;
        match frame {
            WsMessage::Text(text) => return serde_json::from_str(text.as_str()).ok(),
            WsMessage::Close(_) => return None,
            _ => continue,
        }
    }
}
