//! HTTP client for the Consult API.
//!
//! [`HttpMessageStore`] lets a local `Transcript` session run against a
//! remote server, so the client drives the same pipeline as the server does.

use std::sync::Mutex;

use async_trait::async_trait;
use consult_core::{Message, MessageKind, MessageStore, NewMessage, StoreError};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct MessageList {
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    store_connected: bool,
    message_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Typed wrapper over the REST endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            http: Client::new(),
            base: Url::parse(base)?,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    /// `GetMessages` — newest first.
    pub async fn messages(&self, limit: usize) -> Result<Vec<Message>> {
        let resp = self
            .http
            .get(self.url("/api/messages")?)
            .query(&[("limit", limit)])
            .send()
            .await?;
        let list: MessageList = check(resp).await?.json().await?;
        Ok(list.messages)
    }

    /// `SendMessage`.
    pub async fn send_message(&self, author: &str, body: &str, kind: MessageKind) -> Result<Message> {
        let resp = self
            .http
            .post(self.url("/api/messages")?)
            .json(&json!({ "author": author, "body": body, "kind": kind }))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// `SendAgentResponse`.
    pub async fn send_agent_response(&self, body: &str, in_response_to: Option<&str>) -> Result<Message> {
        let resp = self
            .http
            .post(self.url("/api/messages/agent")?)
            .json(&json!({ "body": body, "inResponseTo": in_response_to }))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn health(&self) -> Result<Health> {
        let resp = self.http.get(self.url("/api/hello")?).send().await?;
        Ok(check(resp).await?.json().await?)
    }
}

/// Turn non-2xx responses into `Error::Api` carrying the server's message.
async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ApiErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

fn unavailable(e: Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// Message store that forwards to a remote server.
///
/// Agent messages are sent through `SendAgentResponse` with the most recent
/// user body as `inResponseTo`.
#[derive(Debug)]
pub struct HttpMessageStore {
    api: ApiClient,
    last_prompt: Mutex<Option<String>>,
}

impl HttpMessageStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            last_prompt: Mutex::new(None),
        }
    }

    fn remember_prompt(&self, body: &str) {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(body.to_string());
        }
    }

    fn take_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|mut last| last.take())
    }
}

#[async_trait]
impl MessageStore for HttpMessageStore {
    async fn append(&self, message: NewMessage) -> core::result::Result<Message, StoreError> {
        match message.kind {
            MessageKind::User => {
                let stored = self
                    .api
                    .send_message(&message.author, &message.body, message.kind)
                    .await
                    .map_err(unavailable)?;
                self.remember_prompt(&stored.body);
                Ok(stored)
            }
            MessageKind::Agent => {
                let prompt = self.take_prompt();
                self.api
                    .send_agent_response(&message.body, prompt.as_deref())
                    .await
                    .map_err(unavailable)
            }
        }
    }

    async fn recent(&self, limit: usize) -> core::result::Result<Vec<Message>, StoreError> {
        self.api.messages(limit).await.map_err(unavailable)
    }

    async fn count(&self) -> core::result::Result<u64, StoreError> {
        let health = self.api.health().await.map_err(unavailable)?;
        health
            .message_count
            .ok_or_else(|| StoreError::Unavailable("server store is not connected".into()))
    }

    async fn ping(&self) -> core::result::Result<(), StoreError> {
        let health = self.api.health().await.map_err(unavailable)?;
        if health.store_connected {
            Ok(())
        } else {
            Err(StoreError::Unavailable("server store is not connected".into()))
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}
