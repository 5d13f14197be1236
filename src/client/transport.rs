use crate::error::{NetworkError, PdError};
use anyhow::Context;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";
pub const PAGERDUTY_ACCEPT: &str = "application/vnd.pagerduty+json;version=2";

/// Paramètres de connexion à l'API REST.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Accès REST générique : renvoie le corps JSON d'une réponse 2xx.
pub trait Transport {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, PdError>;
    fn post(&self, path: &str, body: &Value) -> Result<Value, PdError>;
    fn put(&self, path: &str, body: &Value) -> Result<Value, PdError>;
}

/// Transport HTTP bloquant (reqwest), sans rejeu automatique.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, PdError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers(&config.token)?)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn execute(&self, method: &str, path: &str, req: RequestBuilder) -> Result<Value, PdError> {
        debug!(method, path, "PagerDuty request");
        let response = req.send().map_err(|err| {
            warn!(method, path, error = %err, "PagerDuty request did not complete");
            NetworkError::new(err.status().map(|s| s.as_u16()), None)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(method, path, status = status.as_u16(), "PagerDuty request rejected");
            return Err(NetworkError::new(Some(status.as_u16()), status.canonical_reason()).into());
        }

        let body = response
            .text()
            .with_context(|| format!("reading {method} {path} response body"))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, PdError> {
        let req = self.client.get(self.url(path)).query(query);
        self.execute("GET", path, req)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, PdError> {
        let req = self.client.post(self.url(path)).json(body);
        self.execute("POST", path, req)
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, PdError> {
        let req = self.client.put(self.url(path)).json(body);
        self.execute("PUT", path, req)
    }
}

fn default_headers(token: &str) -> Result<HeaderMap, PdError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static(PAGERDUTY_ACCEPT));
    let auth = HeaderValue::from_str(&format!("Token token={token}"))
        .context("token contains characters not allowed in a header")?;
    headers.insert(AUTHORIZATION, auth);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_token_and_api_version() {
        let headers = default_headers("abc").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Token token=abc");
        assert_eq!(headers[ACCEPT], PAGERDUTY_ACCEPT);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        assert!(matches!(default_headers("a\nb"), Err(PdError::Other(_))));
    }

    #[test]
    fn truncated_success_body_is_not_a_status_error() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            stream
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"users\"")
                .unwrap();
        });

        let mut config = ClientConfig::new("abc");
        config.base_url = format!("http://{addr}");
        let transport = HttpTransport::new(&config).unwrap();
        let err = transport.get("/users", &[]).unwrap_err();
        server.join().unwrap();

        match err {
            PdError::Other(err) => assert!(err.to_string().contains("GET /users response body")),
            other => panic!("expected a body read error, got {other:?}"),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut config = ClientConfig::new("abc");
        config.base_url = "http://localhost:8080/".into();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.url("/users"), "http://localhost:8080/users");
    }
}
