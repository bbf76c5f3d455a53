//! HTTP execution against newsapi.org and classification of the outcome.
//!
//! # Architecture
//!
//! - [`ApiRequest`]: a request value that knows its URL and what it decodes into
//! - [`NewsClient`]: owns the `reqwest` client and sends one request at a time
//! - [`decode_body`]: turns a status and body into a payload or an [`Error`]
//!
//! # Classification
//!
//! | Outcome | Result |
//! |---------|--------|
//! | HTTP 401, any body | [`Error::Authentication`] |
//! | `{"status":"error",...}` | [`Error::Api`] |
//! | body matches the payload type | `Ok(payload)`, whatever the status |
//! | body doesn't match | [`Error::Decode`] |
//! | connect/timeout/read failure | [`Error::Transport`] |
//!
//! There is no retry: any error ends the invocation.

use crate::error::Error;
use crate::models::{ApiStatus, News, Sources};
use crate::request::{DEFAULT_URL_BASE, NewsRequest, SourcesRequest};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A request that can be sent with [`NewsClient::send`].
pub trait ApiRequest {
    /// The payload a successful response decodes into.
    type Response: DeserializeOwned;

    /// Full URL of the request against `base`.
    fn url_with_base(&self, base: &str) -> String;
}

impl ApiRequest for NewsRequest {
    type Response = News;

    fn url_with_base(&self, base: &str) -> String {
        NewsRequest::url_with_base(self, base)
    }
}

impl ApiRequest for SourcesRequest {
    type Response = Sources;

    fn url_with_base(&self, base: &str) -> String {
        SourcesRequest::url_with_base(self, base)
    }
}

/// A client for the newsapi.org v2 API.
#[derive(Debug, Clone)]
pub struct NewsClient {
    url_base: String,
    http: reqwest::Client,
}

impl NewsClient {
    /// Create a client for newsapi.org with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_URL_BASE, timeout)
    }

    /// Create a client that sends requests to `url_base` instead.
    pub fn with_base_url(url_base: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url_base: url_base.into(),
            http,
        })
    }

    /// Send `request` and decode the response.
    #[instrument(level = "info", skip_all)]
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, Error> {
        let url = request.url_with_base(&self.url_base);
        let t0 = Instant::now();
        debug!(url = %redact(&url), "Sending request");

        // reqwest errors carry the request URL, apikey included; strip it before logging.
        let response = self.http.get(&url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!(url = %redact(&url), error = %e, "Request failed");
            Error::Transport(e)
        })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.without_url()))?;

        info!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Received response"
        );
        decode_body(status, &body)
    }
}

/// Classify a response and decode its body into `T`.
///
/// Only 401 is treated specially by status; any other status is decoded
/// like a success so long as the body matches.
pub fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T, Error> {
    if status == StatusCode::UNAUTHORIZED {
        warn!("newsapi.org rejected the apikey");
        return Err(Error::Authentication);
    }

    if let Ok(envelope) = serde_json::from_str::<ApiStatus>(body) {
        if envelope.is_error() {
            let code = envelope.code.unwrap_or_else(|| status.as_str().to_string());
            let message = envelope.message.unwrap_or_default();
            warn!(%status, %code, "newsapi.org returned an error");
            return Err(Error::Api { code, message });
        }
    }

    serde_json::from_str(body).map_err(|e| {
        debug!(%status, error = %e, "Body doesn't match the expected payload");
        Error::Decode(e)
    })
}

/// `url` with the `apikey` value masked, for logging.
pub fn redact(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "<invalid url>".to_string();
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Article, Source};
    use crate::request::Endpoint;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on localhost and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/v2", addr)
    }

    fn headlines() -> NewsRequest {
        NewsRequest::new(
            Endpoint::Headlines {
                country: None,
                category: None,
            },
            "KEY",
            "en",
        )
    }

    #[test]
    fn test_401_is_authentication_error_regardless_of_body() {
        for body in [
            "",
            "not json",
            r#"{"articles":[{"title":"A","url":"http://x"}]}"#,
            r#"{"status":"error","code":"apiKeyInvalid","message":"nope"}"#,
        ] {
            let result = decode_body::<News>(StatusCode::UNAUTHORIZED, body);
            assert!(matches!(result, Err(Error::Authentication)), "body: {body}");
        }
    }

    #[test]
    fn test_decode_news() {
        let news: News =
            decode_body(StatusCode::OK, r#"{"articles":[{"title":"A","url":"http://x"}]}"#).unwrap();
        assert_eq!(
            news.articles,
            vec![Article {
                title: "A".into(),
                url: "http://x".into()
            }]
        );
    }

    #[test]
    fn test_decode_sources() {
        let sources: Sources = decode_body(
            StatusCode::OK,
            r#"{"sources":[{"id":"cnn","name":"CNN","description":"desc"}]}"#,
        )
        .unwrap();
        assert_eq!(
            sources.sources,
            vec![Source {
                id: "cnn".into(),
                name: "CNN".into(),
                description: "desc".into()
            }]
        );
    }

    #[test]
    fn test_empty_articles_is_not_an_error() {
        let news: News = decode_body(StatusCode::OK, r#"{"articles":[]}"#).unwrap();
        assert!(news.articles.is_empty());
    }

    #[test]
    fn test_non_401_error_status_with_parseable_body_decodes() {
        let news: News = decode_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"articles":[]}"#).unwrap();
        assert!(news.articles.is_empty());
    }

    #[test]
    fn test_error_envelope_is_api_error() {
        let result = decode_body::<News>(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"status":"error","code":"rateLimited","message":"slow down"}"#,
        );
        match result {
            Err(Error::Api { code, message }) => {
                assert_eq!(code, "rateLimited");
                assert_eq!(message, "slow down");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_mismatched_body_is_decode_error() {
        let result = decode_body::<Sources>(StatusCode::OK, r#"{"articles":[]}"#);
        assert!(matches!(result, Err(Error::Decode(_))));

        let result = decode_body::<News>(StatusCode::OK, "<html>bad gateway</html>");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_redact_hides_apikey() {
        let url = headlines().url();
        let redacted = redact(&url);
        assert!(!redacted.contains("KEY"));
        assert!(redacted.contains("apikey=***") || redacted.contains("apikey=%2A%2A%2A"));
        assert!(redacted.contains("language=en"));
    }

    #[tokio::test]
    async fn test_send_news_over_http() {
        let base = serve_once("200 OK", r#"{"status":"ok","totalResults":1,"articles":[{"title":"A","url":"http://x"}]}"#).await;
        let client = NewsClient::with_base_url(base, DEFAULT_TIMEOUT).unwrap();

        let news = client.send(&headlines()).await.unwrap();
        assert_eq!(news.total_results, Some(1));
        assert_eq!(news.articles[0].title, "A");
    }

    #[tokio::test]
    async fn test_send_sources_over_http() {
        let base = serve_once(
            "200 OK",
            r#"{"sources":[{"id":"cnn","name":"CNN","description":"desc"}]}"#,
        )
        .await;
        let client = NewsClient::with_base_url(base, DEFAULT_TIMEOUT).unwrap();

        let sources = client
            .send(&SourcesRequest::new("KEY", Some("us".into())))
            .await
            .unwrap();
        assert_eq!(sources.sources.len(), 1);
        assert_eq!(sources.sources[0].id, "cnn");
    }

    #[tokio::test]
    async fn test_send_401_over_http() {
        let base = serve_once(
            "401 Unauthorized",
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#,
        )
        .await;
        let client = NewsClient::with_base_url(base, DEFAULT_TIMEOUT).unwrap();

        let result = client.send(&headlines()).await;
        assert!(matches!(result, Err(Error::Authentication)));
    }

    #[tokio::test]
    async fn test_send_to_closed_port_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            NewsClient::with_base_url(format!("http://{}/v2", addr), Duration::from_secs(5)).unwrap();
        let result = client.send(&headlines()).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_reveal_apikey() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            NewsClient::with_base_url(format!("http://{}/v2", addr), Duration::from_secs(5)).unwrap();
        let request = NewsRequest::new(Endpoint::Everything { from: None }, "SECRET123", "en");

        let err = client.send(&request).await.unwrap_err();
        assert!(!err.to_string().contains("SECRET123"));
        assert!(!format!("{err:?}").contains("SECRET123"));
    }
}
