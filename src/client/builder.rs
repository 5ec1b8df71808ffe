use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Request as ReqwestRequest, Response as ReqwestResponse};
use tower::{Layer, Service};

use crate::api::BotContext;
use crate::error::TelegramError;
use crate::types::BotToken;

use super::telegram_client::{MiddlewareExecutor, TelegramClient};
use super::Bot;

/// Builder for [`Bot`]
///
/// Only the token is required. Timeouts are unset unless configured here or
/// on a custom [`reqwest::Client`].
#[must_use]
#[derive(Default)]
pub struct BotBuilder<M = ()> {
    token: Option<BotToken>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    middleware: Option<M>,
}

impl<M> std::fmt::Debug for BotBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotBuilder")
            .field("token", &self.token)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("middleware", &self.middleware.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

impl<M> BotBuilder<M> {
    pub fn token(mut self, token: BotToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Point the client at a local Bot API server or a test double.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Use a preconfigured [`reqwest::Client`] (proxy, TLS roots, ...).
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Route every request through a tower layer wrapping [`TelegramClient`].
    pub fn with_middleware<M2>(self, middleware: M2) -> BotBuilder<M2>
    where
        M2: Layer<TelegramClient> + Clone + Send + Sync + 'static,
    {
        BotBuilder {
            token: self.token,
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            middleware: Some(middleware),
        }
    }

    pub fn build(self) -> Result<Bot, TelegramError>
    where
        M: Layer<TelegramClient> + Clone + Send + Sync + 'static,
        M::Service: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
            + Clone
            + Send
            + Sync
            + 'static,
        <M::Service as Service<ReqwestRequest>>::Future: Send + 'static,
    {
        let token = self
            .token
            .ok_or_else(|| TelegramError::Config("token is required".to_string()))?;

        let mut builder = TelegramClient::builder().token(token);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(http_client) = self.http_client {
            builder = builder.http_client(http_client);
        }
        let mut client = builder.build()?;

        if let Some(middleware) = self.middleware {
            let service = middleware.layer(client.clone());
            let executor = make_middleware_executor(service);
            client = client.with_middleware_executor(executor);
        }

        let context = Arc::new(BotContext::new(Arc::new(client)));
        Ok(Bot::from(context))
    }
}

fn make_middleware_executor<S>(service: S) -> MiddlewareExecutor
where
    S: Service<ReqwestRequest, Response = ReqwestResponse, Error = reqwest::Error>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let service = Arc::new(service);

    Arc::new(move |request: ReqwestRequest| {
        let mut service = (*service).clone();
        Box::pin(async move { service.call(request).await })
    })
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::task::{Context, Poll};

    use tower::{Layer, Service};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const TOKEN: &str = "123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11";

    fn token() -> BotToken {
        BotToken::new(TOKEN).unwrap()
    }

    fn get_me_ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": true,
            "result": {"id": 123456, "is_bot": true, "first_name": "Echo"}
        }))
    }

    #[test]
    fn test_builder_default_values() {
        let bot = Bot::builder().token(token()).build().unwrap();
        assert_eq!(bot.client().base_url(), "https://api.telegram.org");
    }

    #[test]
    fn test_builder_custom_values() {
        let bot = Bot::builder()
            .token(token())
            .base_url("http://localhost:8081/")
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(bot.client().base_url(), "http://localhost:8081");
    }

    #[test]
    fn test_missing_token() {
        let result = Bot::builder().build();
        assert!(matches!(result, Err(TelegramError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = Bot::builder()
            .token(token())
            .base_url("ftp://api.telegram.org")
            .build();
        assert!(matches!(result, Err(TelegramError::Config(_))));
    }

    #[test]
    fn test_debug_hides_token() {
        let builder = Bot::builder().token(token());
        assert!(!format!("{builder:?}").contains("ABC-DEF1234ghIkl"));
    }

    #[tokio::test]
    async fn test_middleware_configured_and_executes() {
        #[derive(Clone)]
        struct CountLayer {
            calls: Arc<AtomicUsize>,
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
            calls: Arc<AtomicUsize>,
        }

        impl Service<ReqwestRequest> for CountService {
            type Response = ReqwestResponse;
            type Error = reqwest::Error;
            type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

            fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
                Poll::Ready(Ok(()))
            }

            fn call(&mut self, req: ReqwestRequest) -> Self::Future {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let mut inner = self.inner.clone();
                Box::pin(async move { inner.call(req).await })
            }
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let layer = CountLayer {
            calls: Arc::clone(&calls),
        };

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getMe")))
            .respond_with(get_me_ok())
            .mount(&mock_server)
            .await;

        let bot = Bot::builder()
            .token(token())
            .base_url(mock_server.uri())
            .with_middleware(layer)
            .build()
            .unwrap();

        bot.get_me().await.unwrap();
        bot.get_me().await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_builder_with_logging_middleware_builds() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/bot{TOKEN}/getMe")))
            .respond_with(get_me_ok())
            .mount(&mock_server)
            .await;

        let bot = Bot::builder()
            .token(token())
            .base_url(mock_server.uri())
            .with_middleware(crate::middleware::LoggingMiddleware::new())
            .build()
            .unwrap();

        assert!(bot.get_me().await.is_ok());
    }
}
