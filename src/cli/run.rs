//! Runs one chat turn for the binary.

use std::io::Write;
use std::time::Duration;

use color_eyre::Result;
use futures::StreamExt;

use super::args::ChatArgs;
use crate::client::ChatClient;
use crate::models::{Chat, ChatStatus, CreateChatRequest, Message, MessageRole, MessageType};
use crate::sse::ChatEvent;
use crate::traits::HttpClient;

/// Interval between status polls in `--no-stream` mode.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// What a chat run produced.
#[derive(Debug, Clone, Default)]
pub struct ChatOutcome {
    /// Last chat state seen; absent if the stream ended before any chat event
    pub chat: Option<Chat>,
    pub answer: String,
    pub follow_ups: Vec<String>,
}

fn is_answer(message: &Message) -> bool {
    message.role == MessageRole::Assistant
        && matches!(message.kind, Some(MessageType::Answer) | None)
}

fn build_request(args: &ChatArgs) -> CreateChatRequest {
    let mut request = CreateChatRequest::new(&args.bot_id, &args.user_id)
        .with_message(Message::user_text(&args.prompt));
    if let Some(conversation_id) = &args.conversation_id {
        request = request.with_conversation_id(conversation_id);
    }
    if !args.meta_data.is_empty() {
        request = request.with_meta_data(args.meta_data.clone());
    }
    request
}

/// Run the chat described by `args`, writing the answer to `out` as it
/// arrives.
pub async fn run_chat<H, W>(client: &ChatClient<H>, args: &ChatArgs, out: &mut W) -> Result<ChatOutcome>
where
    H: HttpClient,
    W: Write,
{
    if args.no_stream {
        run_polling(client, args, out, POLL_INTERVAL).await
    } else {
        run_streaming(client, args, out).await
    }
}

/// Stream the chat and print answer deltas.
pub async fn run_streaming<H, W>(
    client: &ChatClient<H>,
    args: &ChatArgs,
    out: &mut W,
) -> Result<ChatOutcome>
where
    H: HttpClient,
    W: Write,
{
    let mut events = client.stream(build_request(args)).await?;
    let mut outcome = ChatOutcome::default();

    while let Some(event) = events.next().await {
        match event? {
            ChatEvent::MessageDelta(message) => {
                if is_answer(&message) {
                    write!(out, "{}", message.content)?;
                    out.flush()?;
                    outcome.answer.push_str(&message.content);
                }
            }
            ChatEvent::MessageCompleted(message) => {
                if message.kind == Some(MessageType::FollowUp) {
                    outcome.follow_ups.push(message.content);
                }
            }
            ChatEvent::ChatCreated(chat) | ChatEvent::ChatInProgress(chat) => {
                tracing::debug!(chat_id = %chat.id, status = %chat.status, "chat update");
                outcome.chat = Some(chat);
            }
            ChatEvent::ChatCompleted(chat) | ChatEvent::ChatFailed(chat) => {
                outcome.chat = Some(chat);
            }
            ChatEvent::ChatRequiresAction(chat) => {
                tracing::warn!(chat_id = %chat.id, "chat requires tool output, which this client cannot submit");
                outcome.chat = Some(chat);
            }
        }
    }

    finish_output(&outcome, out)?;
    Ok(outcome)
}

/// Polling stops on a terminal status, or when the chat waits for tool
/// output this client cannot submit.
fn stops_polling(status: ChatStatus) -> bool {
    status.is_terminal() || status == ChatStatus::RequiresAction
}

/// Create the chat, poll until it settles, then fetch its messages.
pub async fn run_polling<H, W>(
    client: &ChatClient<H>,
    args: &ChatArgs,
    out: &mut W,
    interval: Duration,
) -> Result<ChatOutcome>
where
    H: HttpClient,
    W: Write,
{
    let mut chat = client.create(build_request(args)).await?;

    while !stops_polling(chat.status) {
        tokio::time::sleep(interval).await;
        chat = client.retrieve(&chat.conversation_id, &chat.id).await?;
        tracing::debug!(chat_id = %chat.id, status = %chat.status, "polled chat");
    }
    if chat.status == ChatStatus::RequiresAction {
        tracing::warn!(chat_id = %chat.id, "chat requires tool output, which this client cannot submit");
    }

    let messages = client.list_messages(&chat.conversation_id, &chat.id).await?;

    let mut outcome = ChatOutcome::default();
    for message in messages {
        if is_answer(&message) {
            outcome.answer.push_str(&message.content);
        } else if message.kind == Some(MessageType::FollowUp) {
            outcome.follow_ups.push(message.content);
        }
    }
    write!(out, "{}", outcome.answer)?;
    outcome.chat = Some(chat);

    finish_output(&outcome, out)?;
    Ok(outcome)
}

fn finish_output<W: Write>(outcome: &ChatOutcome, out: &mut W) -> Result<()> {
    writeln!(out)?;
    for follow_up in &outcome.follow_ups {
        writeln!(out, "  > {}", follow_up)?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::CozeConfig;
    use serde_json::json;

    fn client(http: &MockHttpClient) -> ChatClient<MockHttpClient> {
        ChatClient::with_http_client(
            CozeConfig::new("pat").with_base_url("https://api.test"),
            http.clone(),
        )
    }

    fn args(no_stream: bool) -> ChatArgs {
        ChatArgs {
            bot_id: "b1".to_string(),
            user_id: "u1".to_string(),
            conversation_id: Some("v1".to_string()),
            no_stream,
            prompt: "hello".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_streaming_prints_answer_deltas() {
        let http = MockHttpClient::new();
        let body = concat!(
            "event:conversation.chat.created\n",
            "data:{\"id\":\"c1\",\"conversation_id\":\"v1\",\"bot_id\":\"b1\",\"status\":\"created\"}\n\n",
            "event:conversation.message.delta\n",
            "data:{\"role\":\"assistant\",\"type\":\"answer\",\"content\":\"Hel\",\"content_type\":\"text\"}\n\n",
            "event:conversation.message.delta\n",
            "data:{\"role\":\"assistant\",\"type\":\"answer\",\"content\":\"lo\",\"content_type\":\"text\"}\n\n",
            "event:conversation.message.completed\n",
            "data:{\"role\":\"assistant\",\"type\":\"follow_up\",\"content\":\"Why?\",\"content_type\":\"text\"}\n\n",
            "event:conversation.chat.completed\n",
            "data:{\"id\":\"c1\",\"conversation_id\":\"v1\",\"bot_id\":\"b1\",\"status\":\"completed\"}\n\n",
            "event:done\n",
            "data:\n\n",
        );
        http.set_default_response(MockResponse::sse(body));

        let mut out = Vec::new();
        let outcome = run_chat(&client(&http), &args(false), &mut out).await.unwrap();

        assert_eq!(outcome.answer, "Hello");
        assert_eq!(outcome.follow_ups, vec!["Why?".to_string()]);
        assert_eq!(outcome.chat.unwrap().status, ChatStatus::Completed);
        assert_eq!(String::from_utf8(out).unwrap(), "Hello\n  > Why?\n");

        let sent = http.last_request().unwrap().json_body();
        assert_eq!(sent["conversation_id"], "v1");
        assert_eq!(sent["additional_messages"][0]["content"], "hello");
    }

    #[tokio::test]
    async fn test_streaming_surfaces_error_event() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::sse(
            "event:error\ndata:{\"code\":4000,\"msg\":\"bad bot\"}\n\n",
        ));

        let mut out = Vec::new();
        let err = run_chat(&client(&http), &args(false), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad bot"));
    }

    #[tokio::test]
    async fn test_polling_until_completed() {
        let http = MockHttpClient::new();
        let chat = |status: &str| {
            json!({"code": 0, "msg": "", "data": {
                "id": "c1", "conversation_id": "v1", "bot_id": "b1", "status": status
            }})
        };
        http.set_response("https://api.test/v3/chat", MockResponse::json(200, chat("in_progress")));
        http.set_response(
            "https://api.test/v3/chat/retrieve",
            MockResponse::json(200, chat("completed")),
        );
        http.set_response(
            "https://api.test/v3/chat/message/list",
            MockResponse::json(
                200,
                json!({"code": 0, "msg": "", "data": [
                    {"role": "user", "type": "question", "content": "hello", "content_type": "text"},
                    {"role": "assistant", "type": "answer", "content": "Hi there", "content_type": "text"},
                    {"role": "assistant", "type": "verbose", "content": "{}", "content_type": "text"}
                ]}),
            ),
        );

        let mut out = Vec::new();
        let outcome = run_polling(&client(&http), &args(true), &mut out, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(outcome.answer, "Hi there");
        assert_eq!(outcome.chat.unwrap().status, ChatStatus::Completed);
        assert_eq!(String::from_utf8(out).unwrap(), "Hi there\n");

        let urls: Vec<String> = http.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(urls.len(), 3);
        assert!(urls[1].contains("/v3/chat/retrieve?conversation_id=v1&chat_id=c1"));
    }

    #[tokio::test]
    async fn test_polling_stops_when_action_required() {
        let http = MockHttpClient::new();
        let chat = |status: &str| {
            json!({"code": 0, "msg": "", "data": {
                "id": "c1", "conversation_id": "v1", "bot_id": "b1", "status": status
            }})
        };
        http.set_response("https://api.test/v3/chat", MockResponse::json(200, chat("in_progress")));
        http.set_response(
            "https://api.test/v3/chat/retrieve",
            MockResponse::json(200, chat("requires_action")),
        );
        http.set_response(
            "https://api.test/v3/chat/message/list",
            MockResponse::json(200, json!({"code": 0, "msg": "", "data": [
                {"role": "assistant", "type": "function_call", "content": "{}", "content_type": "text"}
            ]})),
        );

        let mut out = Vec::new();
        let outcome = run_polling(&client(&http), &args(true), &mut out, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(outcome.chat.unwrap().status, ChatStatus::RequiresAction);
        assert!(outcome.answer.is_empty());
        assert_eq!(http.get_requests().len(), 3);
    }
}
