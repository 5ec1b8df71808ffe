//! Reliability tests: flood control, chat migration, transient failures,
//! concurrent use of one bot and local validation.
//!
//! The client never retries on its own; these tests pin down the information
//! it hands back so callers can.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use telegram_bot_sdk::api::media::SendMediaGroupRequest;
use telegram_bot_sdk::api::messages::SendMessageRequest;
use telegram_bot_sdk::client::TelegramClient;
use telegram_bot_sdk::middleware::{Layer, Service};
use telegram_bot_sdk::types::{BotToken, File, InputFile, InputMediaPhoto};
use telegram_bot_sdk::{Bot, HttpError, TelegramError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

fn create_test_bot(base_url: &str) -> Bot {
    Bot::builder()
        .token(BotToken::new(TOKEN).unwrap())
        .base_url(base_url)
        .build()
        .unwrap()
}

fn method_path(name: &str) -> String {
    format!("/bot{TOKEN}/{name}")
}

fn message_json(chat_id: i64, message_id: i32, text: &str) -> serde_json::Value {
    serde_json::json!({
        "message_id": message_id,
        "date": 1700000000,
        "chat": {"id": chat_id, "type": "private", "first_name": "Ada"},
        "text": text
    })
}

// ============================================================
// 1. Flood Control and Migration
// ============================================================

/// A 429 envelope surfaces `retry_after` and is classified as transient.
#[tokio::test]
async fn test_flood_control_exposes_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 17",
            "parameters": {"retry_after": 17}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server.uri());
    let error = bot
        .send_message(&SendMessageRequest::new(42, "spam"))
        .await
        .unwrap_err();

    assert_eq!(error.error_code(), Some(429));
    assert_eq!(error.retry_after(), Some(17));
    assert_eq!(error.migrate_to_chat_id(), None);
    assert!(error.is_transient());
}

/// A migrated group reports the new supergroup id; the caller resends there.
#[tokio::test]
async fn test_group_migration_exposes_new_chat_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(wiremock::matchers::body_partial_json(
            serde_json::json!({"chat_id": -4242}),
        ))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: group chat was upgraded to a supergroup chat",
            "parameters": {"migrate_to_chat_id": -1001234567890i64}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(wiremock::matchers::body_partial_json(
            serde_json::json!({"chat_id": -1001234567890i64}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": message_json(-1001234567890, 1, "moved")
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server.uri());
    let error = bot
        .send_message(&SendMessageRequest::new(-4242, "moved"))
        .await
        .unwrap_err();
    assert!(!error.is_transient());

    let new_chat_id = error.migrate_to_chat_id().unwrap();
    let message = bot
        .send_message(&SendMessageRequest::new(new_chat_id, "moved"))
        .await
        .unwrap();
    assert_eq!(message.chat.id, -1001234567890);
}

// ============================================================
// 2. Transport Failures
// ============================================================

/// Connection failures are transient and never leak the token.
#[tokio::test]
async fn test_connection_failure_is_transient_and_redacted() {
    let bot = create_test_bot("http://127.0.0.1:1");
    let error = bot.get_me().await.unwrap_err();

    assert!(matches!(error, TelegramError::Http(HttpError::Reqwest(_))));
    assert!(error.is_transient());
    let rendered = format!("{error} {error:?}");
    assert!(!rendered.contains("ABC-DEF1234ghIkl"), "token leaked: {rendered}");
}

/// 5xx without an envelope is transient, 4xx without one is not.
#[tokio::test]
async fn test_status_errors_classification() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(method_path("logOut")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server.uri());
    assert!(bot.get_me().await.unwrap_err().is_transient());
    assert!(!bot.log_out().await.unwrap_err().is_transient());
}

// ============================================================
// 3. Local Validation
// ============================================================

/// Invalid requests fail before any HTTP traffic.
#[tokio::test]
async fn test_validation_failures_send_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server.uri());

    let empty_text = bot.send_message(&SendMessageRequest::new(42, "")).await;
    assert!(matches!(empty_text, Err(TelegramError::Validation(_))));

    let too_long = bot
        .send_message(&SendMessageRequest::new(42, "x".repeat(4097)))
        .await;
    assert!(matches!(too_long, Err(TelegramError::Validation(_))));

    let single_item = SendMediaGroupRequest::new(
        42,
        vec![InputMediaPhoto::new(InputFile::file_id("AgAD")).into()],
    );
    let group = bot.send_media_group(&single_item).await;
    assert!(matches!(group, Err(TelegramError::Validation(_))));

    let title = bot.set_chat_title(-100, "").await;
    assert!(matches!(title, Err(TelegramError::Validation(_))));

    let no_path: File = serde_json::from_value(serde_json::json!({
        "file_id": "AgAD",
        "file_unique_id": "u1"
    }))
    .unwrap();
    let download = bot.download_file(&no_path).await;
    assert!(matches!(download, Err(TelegramError::Validation(_))));
}

// ============================================================
// 4. Concurrency
// ============================================================

/// One bot shared across 20 spawned tasks issues 20 independent requests.
#[tokio::test]
async fn test_concurrent_sends_from_spawned_tasks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": message_json(42, 1, "hi")
        })))
        .expect(20)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server.uri());

    let mut handles = Vec::new();
    for i in 0..20 {
        let bot = bot.clone();
        handles.push(tokio::spawn(async move {
            bot.send_message(&SendMessageRequest::new(42, format!("hi {i}")))
                .await
        }));
    }

    let results: Vec<_> = futures::future::join_all(handles).await;

    for (i, result) in results.iter().enumerate() {
        let message = result
            .as_ref()
            .unwrap_or_else(|e| panic!("Task {i} panicked: {e:?}"))
            .as_ref()
            .unwrap_or_else(|e| panic!("Task {i} returned error: {e:?}"));
        assert_eq!(message.chat.id, 42, "Task {i} got wrong chat");
    }
}

/// A failure in one call does not affect calls running beside it.
#[tokio::test]
async fn test_concurrent_failures_are_isolated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(wiremock::matchers::body_partial_json(serde_json::json!({"chat_id": 1})))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(wiremock::matchers::body_partial_json(serde_json::json!({"chat_id": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": message_json(2, 9, "hi")
        })))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server.uri());
    let blocked = SendMessageRequest::new(1, "hi");
    let allowed = SendMessageRequest::new(2, "hi");

    let results = futures::future::join_all(vec![
        bot.send_message(&blocked),
        bot.send_message(&allowed),
    ])
    .await;

    assert_eq!(results[0].as_ref().unwrap_err().error_code(), Some(403));
    assert_eq!(results[1].as_ref().unwrap().message_id, 9);
}

// ============================================================
// 5. Middleware
// ============================================================

#[derive(Clone)]
struct CountLayer {
    calls: Arc<AtomicU32>,
}

impl Layer<TelegramClient> for CountLayer {
    type Service = CountService;

    fn layer(&self, inner: TelegramClient) -> Self::Service {
        CountService {
            inner,
            calls: Arc::clone(&self.calls),
        }
    }
}

#[derive(Clone)]
struct CountService {
    inner: TelegramClient,
    calls: Arc<AtomicU32>,
}

impl Service<reqwest::Request> for CountService {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

/// Middleware sees JSON calls, multipart uploads and file downloads alike.
#[tokio::test]
async fn test_middleware_sees_every_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {"id": 123456, "is_bot": true, "first_name": "Echo"}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(method_path("setChatPhoto")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": true
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/file/bot{TOKEN}/photos/p.jpg")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&mock_server)
        .await;

    let calls = Arc::new(AtomicU32::new(0));
    let bot = Bot::builder()
        .token(BotToken::new(TOKEN).unwrap())
        .base_url(mock_server.uri())
        .with_middleware(CountLayer {
            calls: Arc::clone(&calls),
        })
        .build()
        .unwrap();

    bot.get_me().await.unwrap();
    bot.set_chat_photo(-100, InputFile::memory("p.jpg", vec![0xff, 0xd8]))
        .await
        .unwrap();
    let file: File = serde_json::from_value(serde_json::json!({
        "file_id": "AgAD",
        "file_unique_id": "u1",
        "file_path": "photos/p.jpg"
    }))
    .unwrap();
    bot.download_file(&file).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}
