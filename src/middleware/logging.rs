use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use log::{debug, info};
use reqwest::{Request, Response};
use tower::{Layer, Service};

use crate::utils::redact_token;

/// Logs every outgoing request with its latency
///
/// The bot token is stripped from logged URLs.
#[derive(Clone)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at `debug` level with full URLs instead of `info` with method names.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

impl<S> LoggingMiddlewareService<S> {
    /// Remote method name, or `file` for downloads.
    fn method_name(url: &str) -> &str {
        let path = url.split('?').next().unwrap_or(url);
        if path.contains("/file/bot") {
            return "file";
        }
        path.rsplit('/').next().unwrap_or(path)
    }

    fn log_request(http_method: &str, url: &str, verbose: bool) {
        if verbose {
            debug!("[Telegram] >>> {} {}", http_method, redact_token(url));
        } else {
            info!("[Telegram] {} {}", http_method, Self::method_name(url));
        }
    }

    fn log_response(url: &str, status: u16, duration: std::time::Duration, verbose: bool) {
        if verbose {
            debug!("[Telegram] <<< {} ({:?})", status, duration);
        } else {
            info!(
                "[Telegram] {} -> {} ({:?})",
                Self::method_name(url),
                status,
                duration
            );
        }
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let http_method = req.method().as_str().to_string();
        let url = req.url().to_string();
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            Self::log_request(&http_method, &url, verbose);

            let start = Instant::now();
            let response = match inner.call(req).await {
                Ok(response) => response,
                Err(error) => {
                    info!(
                        "[Telegram] {} failed after {:?}: {}",
                        Self::method_name(&url),
                        start.elapsed(),
                        redact_token(&error.to_string())
                    );
                    return Err(error);
                }
            };

            Self::log_response(&url, response.status().as_u16(), start.elapsed(), verbose);

            Ok(response)
        })
    }
}
