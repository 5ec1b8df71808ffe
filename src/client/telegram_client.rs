//! Telegram HTTP Client
//!
//! Issues one HTTP request per remote method call and decodes the response
//! envelope.

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tower::Service;

use super::request::{multipart_form, uploads};
use crate::error::{HttpError, TelegramError};
use crate::types::{decode_response, BotToken, InputFile};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) type MiddlewareFuture =
    Pin<Box<dyn Future<Output = Result<reqwest::Response, reqwest::Error>> + Send>>;
pub(crate) type MiddlewareExecutor = Arc<dyn Fn(reqwest::Request) -> MiddlewareFuture + Send + Sync>;

/// Telegram Bot API Client
///
/// Reusable HTTP client bound to one bot token. Cloning is cheap; clones share
/// the underlying connection pool.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    token: BotToken,
    base_url: String,
    middleware_executor: Option<MiddlewareExecutor>,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("token", &self.token)
            .field("base_url", &self.base_url)
            .field(
                "middleware_executor",
                &self.middleware_executor.as_ref().map(|_| ".."),
            )
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a new client builder
    pub fn builder() -> TelegramClientBuilder {
        TelegramClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Numeric bot id taken from the token
    pub fn bot_id(&self) -> Option<i64> {
        self.token.bot_id()
    }

    pub(crate) fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token.as_str(), method)
    }

    /// Download URL for a `file_path` returned by getFile.
    ///
    /// The URL embeds the bot token; do not log or share it.
    pub fn file_url(&self, file_path: &str) -> String {
        let path = file_path
            .trim_start_matches('/')
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/file/bot{}/{}", self.base_url, self.token.as_str(), path)
    }

    /// Returns the underlying [`reqwest::Client`] for raw HTTP requests.
    ///
    /// Note: requests made through this client bypass the middleware pipeline.
    pub fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn with_middleware_executor(mut self, executor: MiddlewareExecutor) -> Self {
        self.middleware_executor = Some(executor);
        self
    }

    pub(crate) async fn send_request(
        &self,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(executor) = &self.middleware_executor {
            (executor)(request).await
        } else {
            self.http.execute(request).await
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::Request,
    ) -> Result<T, TelegramError> {
        let response = self.send_request(request).await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("[Telegram] {} -> {}", method, status.as_u16());

        match decode_response(&body) {
            Ok(result) => Ok(result),
            Err(error @ TelegramError::Api { .. }) => Err(error),
            Err(_) if !status.is_success() => Err(HttpError::Status {
                status: status.as_u16(),
                body,
            }
            .into()),
            Err(error) => Err(error),
        }
    }

    /// Call a remote method without parameters using GET
    ///
    /// # Errors
    /// - `TelegramError::Http` for transport failures or non-2xx responses without an envelope
    /// - `TelegramError::Api` when Telegram answers `ok: false`
    /// - `TelegramError::Decode` when the body is not a valid envelope for `T`
    pub async fn get<T: DeserializeOwned>(&self, method: &str) -> Result<T, TelegramError> {
        let request = self.http.get(self.method_url(method)).build()?;
        self.execute(method, request).await
    }

    /// Call a remote method with a JSON body
    ///
    /// Fields the request leaves unset are omitted from the body.
    ///
    /// # Errors
    /// Same as [`get`](Self::get).
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramError> {
        let request = self.http.post(self.method_url(method)).json(body).build()?;
        self.execute(method, request).await
    }

    /// Call a remote method whose body may reference files
    ///
    /// Falls back to [`post`](Self::post) unless one of `files` is an
    /// in-memory upload, in which case the body is sent as
    /// `multipart/form-data`.
    ///
    /// # Errors
    /// Same as [`get`](Self::get).
    pub async fn post_with_files<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &str,
        body: &B,
        files: &[&InputFile],
    ) -> Result<T, TelegramError> {
        let uploads = uploads(files.iter().copied());
        if uploads.is_empty() {
            return self.post(method, body).await;
        }

        debug!("[Telegram] {} uploading {} file(s)", method, uploads.len());
        let form = multipart_form(body, &uploads)?;
        let request = self
            .http
            .post(self.method_url(method))
            .multipart(form)
            .build()?;
        self.execute(method, request).await
    }

    /// Download the content of a file by its `file_path`
    ///
    /// # Errors
    /// - `TelegramError::Http` for transport failures or a non-2xx status
    pub async fn download_file(&self, file_path: &str) -> Result<Vec<u8>, TelegramError> {
        let request = self.http.get(self.file_url(file_path)).build()?;
        let response = self.send_request(request).await?;
        let status = response.status();
        debug!("[Telegram] download -> {}", status.as_u16());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl Service<reqwest::Request> for TelegramClient {
    type Response = reqwest::Response;
    type Error = reqwest::Error;
    type Future = MiddlewareFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: reqwest::Request) -> Self::Future {
        let client = self.http.clone();
        Box::pin(async move { client.execute(req).await })
    }
}

/// Builder for TelegramClient
///
/// # Example
///
/// ```rust
/// use telegram_bot_sdk::client::TelegramClient;
/// use telegram_bot_sdk::types::BotToken;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let token = BotToken::new("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11")?;
///
///     let client = TelegramClient::builder().token(token).build()?;
///     assert_eq!(client.bot_id(), Some(123456));
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct TelegramClientBuilder {
    token: Option<BotToken>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl TelegramClientBuilder {
    /// Set the bot token
    pub fn token(mut self, token: BotToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Set the base URL for API calls
    ///
    /// Default: `<https://api.telegram.org>`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the total timeout for requests
    ///
    /// Default: none. Long polling with getUpdates needs a timeout larger
    /// than the `timeout` parameter sent to Telegram.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    ///
    /// Default: none
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured [`reqwest::Client`]; timeouts set on this builder are ignored.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Build the TelegramClient
    ///
    /// # Errors
    /// Returns an error if the token is not set, the base URL is not http(s),
    /// or the HTTP client cannot be constructed
    pub fn build(self) -> Result<TelegramClient, TelegramError> {
        let token = self
            .token
            .ok_or_else(|| TelegramError::Config("token is required".to_string()))?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(TelegramError::Config(format!(
                "base_url must start with http:// or https://, got: {}",
                base_url
            )));
        }
        let base_url = base_url.trim_end_matches('/').to_string();

        let http = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(connect_timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(connect_timeout);
                }
                builder.build()?
            }
        };

        Ok(TelegramClient {
            http,
            token,
            base_url,
            middleware_executor: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

    fn client_for(base_url: &str) -> TelegramClient {
        TelegramClient::builder()
            .token(BotToken::new(TOKEN).unwrap())
            .base_url(base_url)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_default_values() {
        let client = TelegramClient::builder()
            .token(BotToken::new(TOKEN).unwrap())
            .build()
            .unwrap();

        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.bot_id(), Some(123456));
    }

    #[test]
    fn test_builder_missing_token() {
        let result = TelegramClient::builder().build();
        assert!(matches!(result, Err(TelegramError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_non_http_base_url() {
        let result = TelegramClient::builder()
            .token(BotToken::new(TOKEN).unwrap())
            .base_url("ftp://api.telegram.org")
            .build();
        assert!(matches!(result, Err(TelegramError::Config(_))));
    }

    #[test]
    fn test_method_url_trims_trailing_slash() {
        let client = client_for("http://localhost:8081/");
        assert_eq!(
            client.method_url("getMe"),
            format!("http://localhost:8081/bot{TOKEN}/getMe")
        );
    }

    #[test]
    fn test_file_url_encodes_segments() {
        let client = client_for("https://api.telegram.org");
        assert_eq!(
            client.file_url("documents/my file.pdf"),
            format!("https://api.telegram.org/file/bot{TOKEN}/documents/my%20file.pdf")
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = client_for("https://api.telegram.org");
        let debug = format!("{client:?}");
        assert!(!debug.contains("ABC-DEF1234ghIkl"));
    }

    #[tokio::test]
    async fn test_get_decodes_result() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getMe")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": {"id": 123456, "is_bot": true, "first_name": "Echo"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let user: crate::types::User = client.get("getMe").await.unwrap();
        assert_eq!(user.id, 123456);
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/deleteMessage")))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"chat_id": 5, "message_id": 9})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"ok": true, "result": true})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let deleted: bool = client
            .post(
                "deleteMessage",
                &serde_json::json!({"chat_id": 5, "message_id": 9}),
            )
            .await
            .unwrap();
        assert!(deleted);
    }

    #[tokio::test]
    async fn test_error_envelope_with_error_status_is_api_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let error = client
            .post::<bool, _>("leaveChat", &serde_json::json!({"chat_id": 1}))
            .await
            .unwrap_err();

        match error {
            TelegramError::Api {
                code, description, ..
            } => {
                assert_eq!(code, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_envelope_error_status_is_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let error = client.get::<bool>("close").await.unwrap_err();

        match error {
            TelegramError::Http(HttpError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert!(body.contains("Bad Gateway"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let error = client.get::<bool>("logOut").await.unwrap_err();

        match error {
            TelegramError::Decode { body, .. } => assert_eq!(body, "not json"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_with_files_without_uploads_uses_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/bot{TOKEN}/sendPhoto")))
            .and(body_json(serde_json::json!({"chat_id": 1, "photo": "AgAD"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ok": true,
                "result": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let photo = InputFile::file_id("AgAD");
        let body = serde_json::json!({"chat_id": 1, "photo": &photo});
        let ok: bool = client
            .post_with_files("sendPhoto", &body, &[&photo])
            .await
            .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn test_download_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/file/bot{TOKEN}/photos/file_0.jpg")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xd8, 0xff]))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let bytes = client.download_file("photos/file_0.jpg").await.unwrap();
        assert_eq!(bytes, vec![0xff, 0xd8, 0xff]);
    }

    #[tokio::test]
    async fn test_download_missing_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let error = client.download_file("photos/gone.jpg").await.unwrap_err();
        assert!(matches!(
            error,
            TelegramError::Http(HttpError::Status { status: 404, .. })
        ));
    }
}
