//! Chat API client.
//!
//! Wraps the `/v3/chat` endpoints on top of an [`HttpClient`]:
//!
//! | Operation       | Request                                   | Result            |
//! |-----------------|-------------------------------------------|-------------------|
//! | `create`        | `POST /v3/chat` (`stream=false`)          | [`Chat`]          |
//! | `stream`        | `POST /v3/chat` (`stream=true`)           | [`ChatEventStream`] |
//! | `retrieve`      | `POST /v3/chat/retrieve?conversation_id&chat_id` | [`Chat`]   |
//! | `cancel`        | `POST /v3/chat/cancel?conversation_id&chat_id`   | [`Chat`]   |
//! | `list_messages` | `POST /v3/chat/message/list?conversation_id&chat_id` | `Vec<Message>` |
//!
//! Buffered responses use the `{code, msg, data}` envelope; a non-zero code
//! becomes [`CozeError::Api`].

use serde::de::DeserializeOwned;

use crate::adapters::ReqwestHttpClient;
use crate::config::CozeConfig;
use crate::error::{CozeError, CozeResult};
use crate::models::{ApiResponse, Chat, CreateChatRequest, Message};
use crate::sse::{decode_byte_stream, ChatEventStream};
use crate::traits::{Headers, HttpClient, HttpError, Response};

const CHAT_PATH: &str = "/v3/chat";
const RETRIEVE_PATH: &str = "/v3/chat/retrieve";
const CANCEL_PATH: &str = "/v3/chat/cancel";
const MESSAGE_LIST_PATH: &str = "/v3/chat/message/list";

/// Client for the chat endpoints.
#[derive(Debug, Clone)]
pub struct ChatClient<H: HttpClient = ReqwestHttpClient> {
    http: H,
    config: CozeConfig,
}

impl ChatClient<ReqwestHttpClient> {
    /// Client backed by reqwest, using the configured timeout.
    pub fn new(config: CozeConfig) -> CozeResult<Self> {
        config.validate()?;
        let http = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self { http, config })
    }

    /// Shorthand for `ChatClient::new(CozeConfig::from_env()?)`.
    pub fn from_env() -> CozeResult<Self> {
        Self::new(CozeConfig::from_env()?)
    }
}

impl<H: HttpClient> ChatClient<H> {
    /// Client over any transport, typically a mock in tests.
    pub fn with_http_client(config: CozeConfig, http: H) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &CozeConfig {
        &self.config
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    /// Start a chat and return it without waiting for the answer.
    ///
    /// The returned chat is usually `in_progress`; poll [`Self::retrieve`]
    /// for completion and [`Self::list_messages`] for the answer.
    pub async fn create(&self, request: CreateChatRequest) -> CozeResult<Chat> {
        let body = Self::chat_body(request, false)?;
        let url = self.config.endpoint(CHAT_PATH);

        let chat: Chat = self.post_envelope(&url, Some(&body)).await?;
        tracing::info!(chat_id = %chat.id, conversation_id = %chat.conversation_id, status = %chat.status, "chat created");
        Ok(chat)
    }

    /// Start a chat and stream its events.
    ///
    /// Failures before the first byte (transport, non-2xx status) are
    /// returned here; failures while reading arrive as the stream's last
    /// item.
    pub async fn stream(&self, request: CreateChatRequest) -> CozeResult<ChatEventStream> {
        let body = Self::chat_body(request, true)?;
        let url = self.config.endpoint(CHAT_PATH);

        let mut headers = self.json_headers();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        tracing::debug!(url = %url, "opening chat stream");
        let bytes = self
            .http
            .post_stream(&url, &body, &headers)
            .await
            .map_err(|e| {
                tracing::error!("chat stream request failed: {}", e);
                match e {
                    HttpError::ServerError { status, message } => {
                        CozeError::ServerError { status, message }
                    }
                    other => CozeError::Http(other),
                }
            })?;

        Ok(decode_byte_stream(bytes))
    }

    /// Fetch the current state of a chat.
    pub async fn retrieve(&self, conversation_id: &str, chat_id: &str) -> CozeResult<Chat> {
        let url = self.chat_url(RETRIEVE_PATH, conversation_id, chat_id)?;
        self.post_envelope(&url, None).await
    }

    /// Cancel a chat that is still in progress.
    pub async fn cancel(&self, conversation_id: &str, chat_id: &str) -> CozeResult<Chat> {
        let url = self.chat_url(CANCEL_PATH, conversation_id, chat_id)?;
        let chat: Chat = self.post_envelope(&url, None).await?;
        tracing::info!(chat_id = %chat.id, status = %chat.status, "chat cancelled");
        Ok(chat)
    }

    /// Messages produced by a chat, including verbose and follow-up ones.
    pub async fn list_messages(
        &self,
        conversation_id: &str,
        chat_id: &str,
    ) -> CozeResult<Vec<Message>> {
        let url = self.chat_url(MESSAGE_LIST_PATH, conversation_id, chat_id)?;
        self.post_envelope(&url, None).await
    }

    fn chat_body(mut request: CreateChatRequest, stream: bool) -> CozeResult<String> {
        request.validate().map_err(CozeError::InvalidRequest)?;
        request.stream = stream;
        Ok(serde_json::to_string(&request)?)
    }

    fn chat_url(&self, path: &str, conversation_id: &str, chat_id: &str) -> CozeResult<String> {
        if conversation_id.is_empty() || chat_id.is_empty() {
            return Err(CozeError::InvalidRequest(
                "conversation_id and chat_id must not be empty".to_string(),
            ));
        }
        Ok(format!(
            "{}?conversation_id={}&chat_id={}",
            self.config.endpoint(path),
            urlencoding::encode(conversation_id),
            urlencoding::encode(chat_id)
        ))
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.config.api_token),
        );
        headers
    }

    fn json_headers(&self) -> Headers {
        let mut headers = self.headers();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    /// POST and unwrap the envelope. Query-only requests pass no body and
    /// are sent empty, without a JSON content type.
    async fn post_envelope<T: DeserializeOwned>(
        &self,
        url: &str,
        body: Option<&str>,
    ) -> CozeResult<T> {
        tracing::debug!(url = %url, "POST");
        let headers = match body {
            Some(_) => self.json_headers(),
            None => self.headers(),
        };
        let body = body.unwrap_or_default();
        let response = self.http.post(url, body, &headers).await.map_err(|e| {
            tracing::error!("request to {} failed: {}", url, e);
            CozeError::Http(e)
        })?;

        let result = unwrap_envelope(response);
        if let Err(e) = &result {
            tracing::error!(code = e.error_code(), "request to {} failed: {}", url, e);
        }
        result
    }
}

/// Turn a buffered response into the envelope's `data`.
fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> CozeResult<T> {
    if !response.is_success() {
        let message = response
            .text()
            .unwrap_or_else(|_| "<non UTF-8 body>".to_string());
        return Err(CozeError::ServerError {
            status: response.status,
            message,
        });
    }

    let envelope: ApiResponse<T> = response.json()?;

    if !envelope.is_success() {
        let logid = envelope
            .logid()
            .or_else(|| response.logid())
            .map(str::to_string);
        return Err(CozeError::Api {
            code: envelope.code,
            msg: envelope.msg,
            logid,
        });
    }

    envelope
        .data
        .ok_or_else(|| CozeError::InvalidResponse("response has no data".to_string()))
}
