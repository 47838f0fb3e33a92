use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::NetworkError;

pub const DEFAULT_BASE_URL: &str = "https://rae-api.com/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Client for the RAE dictionary API.
#[derive(Debug, Clone)]
pub struct RaeClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl RaeClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /random`
    pub async fn random_word(&self) -> Result<String, NetworkError> {
        self.fetch_word("random").await
    }

    /// `GET /daily`
    pub async fn daily_word(&self) -> Result<String, NetworkError> {
        self.fetch_word("daily").await
    }

    async fn fetch_word(&self, path: &str) -> Result<String, NetworkError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "requesting dictionary word");

        let request = async {
            let response = self.http.get(&url).header(ACCEPT, "application/json").send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(NetworkError::Status {
                    code: status.as_u16(),
                    reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                });
            }
            let body = response.bytes().await?;
            parse_word(&body)
        };

        // Dropping the request future on timeout aborts the in-flight request.
        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(word)) => Ok(word),
            Ok(Err(e)) => {
                warn!(%url, error = %e, "dictionary request failed");
                Err(e)
            }
            Err(_) => {
                warn!(%url, timeout_ms = self.timeout.as_millis() as u64, "dictionary request timed out");
                Err(NetworkError::Timeout(self.timeout))
            }
        }
    }
}

fn parse_word(body: &[u8]) -> Result<String, NetworkError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| NetworkError::MalformedPayload(e.to_string()))?;

    match payload.get("word").and_then(Value::as_str).map(str::trim) {
        Some(word) if !word.is_empty() => Ok(word.to_uppercase()),
        _ => Err(NetworkError::MalformedPayload("missing `word` field".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers exactly one request with `status` and `body`, after `delay`.
    /// Resolves to the raw request head.
    async fn serve_once(status: &'static str, body: &'static str, delay: Duration) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/api"), handle)
    }

    #[tokio::test]
    async fn random_word_is_uppercased() {
        let (base, server) = serve_once("200 OK", r#"{"id":"x1","word":"  cigüeña "}"#, Duration::ZERO).await;
        let client = RaeClient::new(base, DEFAULT_TIMEOUT).unwrap();

        assert_eq!(client.random_word().await.unwrap(), "CIGÜEÑA");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.starts_with("get /api/random "));
        assert!(request.contains("accept: application/json"));
    }

    #[tokio::test]
    async fn daily_word_hits_daily_path() {
        let (base, server) = serve_once("200 OK", r#"{"word":"sol"}"#, Duration::ZERO).await;
        let client = RaeClient::new(format!("{base}/"), DEFAULT_TIMEOUT).unwrap();

        assert_eq!(client.daily_word().await.unwrap(), "SOL");
        assert!(server.await.unwrap().starts_with("GET /api/daily "));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _server) = serve_once("503 Service Unavailable", "{}", Duration::ZERO).await;
        let client = RaeClient::new(base, DEFAULT_TIMEOUT).unwrap();

        match client.random_word().await {
            Err(NetworkError::Status { code, .. }) => assert_eq!(code, 503),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_word_field_is_malformed() {
        let (base, _server) = serve_once("200 OK", r#"{"id":"x1"}"#, Duration::ZERO).await;
        let client = RaeClient::new(base, DEFAULT_TIMEOUT).unwrap();

        assert!(matches!(client.random_word().await, Err(NetworkError::MalformedPayload(_))));
    }

    #[tokio::test]
    async fn slow_dictionary_times_out() {
        let (base, _server) = serve_once("200 OK", r#"{"word":"tarde"}"#, Duration::from_secs(2)).await;
        let client = RaeClient::new(base, Duration::from_millis(100)).unwrap();

        let err = client.random_word().await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn parse_rejects_non_json_and_empty_words() {
        assert!(matches!(parse_word(b"<html>"), Err(NetworkError::MalformedPayload(_))));
        assert!(matches!(parse_word(br#"{"word":""}"#), Err(NetworkError::MalformedPayload(_))));
        assert!(matches!(parse_word(br#"{"word":42}"#), Err(NetworkError::MalformedPayload(_))));
    }
}
