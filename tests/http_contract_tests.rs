//! HTTP contract tests: request shape and response envelope decoding.
//!
//! Every remote method maps to `/bot<token>/<method>`. Operations without
//! parameters use GET, everything else POSTs a JSON body that omits unset
//! fields, and uploads switch the body to multipart.

use serde_json::json;
use telegram_bot_sdk::api::editing::EditMessageReplyMarkupRequest;
use telegram_bot_sdk::api::media::{SendDocumentRequest, SendPhotoRequest};
use telegram_bot_sdk::api::messages::SendMessageRequest;
use telegram_bot_sdk::api::settings::{GetChatMenuButtonRequest, SetMyTextRequest};
use telegram_bot_sdk::api::updates::GetUpdatesRequest;
use telegram_bot_sdk::types::{
    AllowedUpdate, BotToken, InlineKeyboardButtonKind, InputFile, MenuButton, MessageTarget,
    StickerType, UpdateKind,
};
use telegram_bot_sdk::{Bot, HttpError, TelegramError};
use wiremock::matchers::{body_json, body_string_contains, header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

fn create_test_bot(mock_server: &MockServer) -> Bot {
    Bot::builder()
        .token(BotToken::new(TOKEN).unwrap())
        .base_url(mock_server.uri())
        .build()
        .unwrap()
}

fn method_path(name: &str) -> String {
    format!("/bot{TOKEN}/{name}")
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": result}))
}

fn message_json(chat_id: i64, message_id: i32) -> serde_json::Value {
    json!({
        "message_id": message_id,
        "date": 1700000000,
        "chat": {"id": chat_id, "type": "private", "first_name": "Ada"},
        "text": "hi"
    })
}

// ============================================================
// Request shape
// ============================================================

#[tokio::test]
async fn test_parameterless_operations_use_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ok(json!({"id": 123456, "is_bot": true, "first_name": "Echo"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(method_path("getWebhookInfo")))
        .respond_with(ok(json!({"url": "", "has_custom_certificate": false, "pending_update_count": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(method_path("getForumTopicIconStickers")))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let me = bot.get_me().await.unwrap();
    assert!(me.is_bot);
    let info = bot.get_webhook_info().await.unwrap();
    assert_eq!(info.pending_update_count, 0);
    assert!(bot.get_forum_topic_icon_stickers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_post_sends_json_and_omits_unset_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"chat_id": 42, "text": "hi"})))
        .respond_with(ok(message_json(42, 1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let message = bot
        .send_message(&SendMessageRequest::new(42, "hi"))
        .await
        .unwrap();
    assert_eq!(message.message_id, 1);
}

#[tokio::test]
async fn test_numeric_string_chat_id_is_sent_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(body_json(json!({"chat_id": "123", "text": "hi"})))
        .respond_with(ok(message_json(123, 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let message = bot
        .send_message(&SendMessageRequest::new("123", "hi"))
        .await
        .unwrap();

    assert_eq!(message.message_id, 5);
    assert_eq!(message.chat.id, 123);
    assert_eq!(message.text.as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_username_chat_id_is_sent_as_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .and(body_json(json!({"chat_id": "@rustlang", "text": "hi"})))
        .respond_with(ok(message_json(-100123, 2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    bot.send_message(&SendMessageRequest::new("@rustlang", "hi"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_explicit_empty_text_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("setMyDescription")))
        .and(body_json(json!({"description": ""})))
        .respond_with(ok(json!(true)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    assert!(bot
        .set_my_description(&SetMyTextRequest::clear())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_removing_reply_markup_omits_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("editMessageReplyMarkup")))
        .and(body_json(json!({"chat_id": 42, "message_id": 7})))
        .respond_with(ok(message_json(42, 7)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let request = EditMessageReplyMarkupRequest::remove(MessageTarget::chat(42, 7));
    let edited = bot.edit_message_reply_markup(&request).await.unwrap();
    assert!(edited.message().is_some());
}

#[tokio::test]
async fn test_file_reference_stays_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendPhoto")))
        .and(body_json(json!({
            "chat_id": 42,
            "photo": "https://example.com/ferris.png",
            "caption": "Ferris"
        })))
        .respond_with(ok(message_json(42, 3)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let request = SendPhotoRequest::new(42, InputFile::url("https://example.com/ferris.png"))
        .caption("Ferris");
    bot.send_photo(&request).await.unwrap();
}

#[tokio::test]
async fn test_upload_switches_to_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendDocument")))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"chat_id\""))
        .and(body_string_contains("attach://file"))
        .and(body_string_contains("filename=\"report.csv\""))
        .and(body_string_contains("a,b,c"))
        .respond_with(ok(message_json(42, 4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let request = SendDocumentRequest::new(42, InputFile::memory("report.csv", b"a,b,c".to_vec()));
    bot.send_document(&request).await.unwrap();
}

// ============================================================
// Response envelope
// ============================================================

#[tokio::test]
async fn test_api_error_envelope_with_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: chat not found"
        })))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let error = bot
        .send_message(&SendMessageRequest::new(1, "hi"))
        .await
        .unwrap_err();

    match error {
        TelegramError::Api {
            code, description, ..
        } => {
            assert_eq!(code, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("expected api error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_api_error_envelope_with_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let error = bot.get_me().await.unwrap_err();
    assert_eq!(error.error_code(), Some(401));
}

#[tokio::test]
async fn test_non_envelope_error_status_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let error = bot.get_me().await.unwrap_err();

    match &error {
        TelegramError::Http(HttpError::Status { status, body }) => {
            assert_eq!(*status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("expected http status error, got: {:?}", other),
    }
    assert!(error.is_transient());
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let error = bot.get_me().await.unwrap_err();

    match error {
        TelegramError::Decode { body, .. } => assert_eq!(body, "not json"),
        other => panic!("expected decode error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_result_of_unexpected_shape_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ok(json!(true)))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let error = bot.get_me().await.unwrap_err();
    assert!(matches!(error, TelegramError::Decode { .. }));
}

#[tokio::test]
async fn test_unknown_response_fields_are_ignored() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getMe")))
        .respond_with(ok(json!({
            "id": 123456,
            "is_bot": true,
            "first_name": "Echo",
            "has_main_web_app": false,
            "some_future_field": {"nested": [1, 2, 3]}
        })))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let me = bot.get_me().await.unwrap();
    assert_eq!(me.id, 123456);
}

// ============================================================
// Values added to the Bot API later
// ============================================================

fn message_with_copy_button(chat_id: i64, message_id: i32) -> serde_json::Value {
    let mut message = message_json(chat_id, message_id);
    message["reply_markup"] = json!({"inline_keyboard": [[
        {"text": "Vote", "callback_data": "vote:1"},
        {"text": "Copy", "copy_text": {"text": "promo-42"}}
    ]]});
    message
}

#[tokio::test]
async fn test_unknown_button_kind_in_sent_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("sendMessage")))
        .respond_with(ok(message_with_copy_button(42, 8)))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let message = bot
        .send_message(&SendMessageRequest::new(42, "hi"))
        .await
        .unwrap();

    let row = &message.reply_markup.unwrap().inline_keyboard[0];
    assert_eq!(row[0].kind, InlineKeyboardButtonKind::CallbackData("vote:1".into()));
    assert!(matches!(row[1].kind, InlineKeyboardButtonKind::Unknown(_)));
}

#[tokio::test]
async fn test_unknown_button_kind_keeps_update_batch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("getUpdates")))
        .respond_with(ok(json!([
            {"update_id": 1, "message": message_json(42, 1)},
            {"update_id": 2, "callback_query": {
                "id": "cb-9",
                "from": {"id": 42, "is_bot": false, "first_name": "Ada"},
                "message": message_with_copy_button(42, 2),
                "chat_instance": "ci",
                "data": "vote:1"
            }}
        ])))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let updates = bot.get_updates(&GetUpdatesRequest::new()).await.unwrap();
    assert_eq!(updates.len(), 2);
    assert!(matches!(updates[1].kind, UpdateKind::CallbackQuery(_)));
}

#[tokio::test]
async fn test_unknown_allowed_update_in_webhook_info() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(method_path("getWebhookInfo")))
        .respond_with(ok(json!({
            "url": "https://example.com/hook",
            "has_custom_certificate": false,
            "pending_update_count": 0,
            "allowed_updates": ["message", "message_reaction"]
        })))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let info = bot.get_webhook_info().await.unwrap();
    assert_eq!(
        info.allowed_updates,
        Some(vec![
            AllowedUpdate::Message,
            AllowedUpdate::Other("message_reaction".into())
        ])
    );
}

#[tokio::test]
async fn test_newer_update_kind_can_be_requested() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("getUpdates")))
        .and(body_json(json!({"allowed_updates": ["message", "chat_boost"]})))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let request = GetUpdatesRequest::new().allowed_updates(vec![
        AllowedUpdate::Message,
        AllowedUpdate::from("chat_boost"),
    ]);
    assert!(bot.get_updates(&request).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_sticker_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("getStickerSet")))
        .respond_with(ok(json!({
            "name": "future_by_bot",
            "title": "Future",
            "sticker_type": "holographic",
            "stickers": [{
                "file_id": "CAAC",
                "file_unique_id": "u1",
                "type": "holographic",
                "width": 512,
                "height": 512,
                "is_animated": false,
                "is_video": false
            }]
        })))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let set = bot.get_sticker_set("future_by_bot").await.unwrap();
    assert_eq!(set.sticker_type, StickerType::Unknown);
    assert_eq!(set.stickers[0].sticker_type, StickerType::Unknown);
}

#[tokio::test]
async fn test_unknown_menu_button_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("getChatMenuButton")))
        .respond_with(ok(json!({"type": "mini_app", "text": "Open"})))
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let button = bot
        .get_chat_menu_button(&GetChatMenuButtonRequest::new())
        .await
        .unwrap();
    assert_eq!(button, MenuButton::Unknown);
}

// ============================================================
// Files
// ============================================================

#[tokio::test]
async fn test_get_file_then_download() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(method_path("getFile")))
        .and(body_json(json!({"file_id": "AgAD"})))
        .respond_with(ok(json!({
            "file_id": "AgAD",
            "file_unique_id": "u1",
            "file_size": 5,
            "file_path": "documents/file_1.txt"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/file/bot{TOKEN}/documents/file_1.txt")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let bot = create_test_bot(&mock_server);
    let file = bot.get_file("AgAD").await.unwrap();
    let content = bot.download_file(&file).await.unwrap();
    assert_eq!(content, b"hello");
}
