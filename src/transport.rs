//! HTTP transport boundary.
//!
//! The transport performs one request and hands back the raw status code
//! and body; interpreting success/error semantics is the envelope layer's
//! job, never the transport's.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::Result;

/// HTTP verbs used by the node API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One raw response from the node, before any envelope interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub http_code: u16,
    /// Parsed JSON body; [`Value::Null`] when the body was empty.
    pub payload: Value,
    pub headers: Option<HashMap<String, String>>,
    pub raw_body: Option<String>,
}

impl HttpResponse {
    pub fn is_success_code(&self) -> bool {
        (200..300).contains(&self.http_code)
    }
}

/// TLS settings for the node connection, passed through to the HTTP client
/// unchanged.
#[derive(Debug, Clone)]
pub struct TlsConfig {
    verify: bool,
    identity_pem: Option<Vec<u8>>,
    ca_pem: Option<Vec<u8>>,
}

impl TlsConfig {
    pub fn new() -> Self {
        Self {
            verify: true,
            identity_pem: None,
            ca_pem: None,
        }
    }

    /// Client certificate + key in PEM form.
    pub fn identity(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.identity_pem = Some(pem.into());
        self
    }

    /// Trusted CA certificate in PEM form.
    pub fn ca(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_pem = Some(pem.into());
        self
    }

    /// Disables peer verification when `false`.
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Performs node requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs one request and returns the raw response.
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<HttpResponse>;

    async fn get(&self, endpoint: &str, payload: Option<&Value>) -> Result<HttpResponse> {
        self.call(Method::Get, endpoint, payload).await
    }

    async fn post(&self, endpoint: &str, payload: Option<&Value>) -> Result<HttpResponse> {
        self.call(Method::Post, endpoint, payload).await
    }

    async fn put(&self, endpoint: &str, payload: Option<&Value>) -> Result<HttpResponse> {
        self.call(Method::Put, endpoint, payload).await
    }

    async fn delete(&self, endpoint: &str, payload: Option<&Value>) -> Result<HttpResponse> {
        self.call(Method::Delete, endpoint, payload).await
    }
}

/// Default reqwest-backed transport.
pub struct NodeTransport {
    client: Client,
    base_url: String,
}

impl NodeTransport {
    /// Plain-HTTP transport for `host:port`.
    pub fn new(host: &str, port: u16) -> Result<Self> {
        Self::with_tls(host, port, None)
    }

    /// Transport for `host:port`; https when a [`TlsConfig`] is given.
    pub fn with_tls(host: &str, port: u16, tls: Option<TlsConfig>) -> Result<Self> {
        let mut builder = Client::builder().timeout(Duration::from_secs(30));

        if let Some(tls) = &tls {
            if !tls.verify {
                builder = builder.danger_accept_invalid_certs(true);
            }
            if let Some(ca) = &tls.ca_pem {
                builder = builder.add_root_certificate(reqwest::Certificate::from_pem(ca)?);
            }
            if let Some(identity) = &tls.identity_pem {
                builder = builder.identity(reqwest::Identity::from_pem(identity)?);
            }
        }

        let client = builder.build()?;
        let scheme = if tls.is_some() { "https" } else { "http" };
        Ok(Self {
            client,
            base_url: format!("{}://{}:{}", scheme, host, port),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for NodeTransport {
    async fn call(
        &self,
        method: Method,
        endpoint: &str,
        payload: Option<&Value>,
    ) -> Result<HttpResponse> {
        let url = self.url(endpoint);
        log::debug!("{} {}", method.as_str(), url);

        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };

        if let Some(payload) = payload {
            request = if method == Method::Get {
                request.query(payload)
            } else {
                request.json(payload)
            };
        }

        let response = request.send().await?;
        let http_code = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let raw_body = response.text().await?;
        let payload = if raw_body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw_body)?
        };

        Ok(HttpResponse {
            http_code,
            payload,
            headers: Some(headers),
            raw_body: Some(raw_body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let transport = NodeTransport::new("localhost", 8090).unwrap();
        assert_eq!(
            transport.url("/api/v1/wallets"),
            "http://localhost:8090/api/v1/wallets"
        );
        assert_eq!(
            transport.url("v2/wallets"),
            "http://localhost:8090/v2/wallets"
        );
    }

    #[test]
    fn test_tls_switches_scheme() {
        let transport =
            NodeTransport::with_tls("node.example", 8090, Some(TlsConfig::new())).unwrap();
        assert!(transport.url("/v2/wallets").starts_with("https://node.example:8090/"));
    }

    #[test]
    fn test_success_code_range() {
        let res = HttpResponse {
            http_code: 204,
            payload: Value::Null,
            headers: None,
            raw_body: None,
        };
        assert!(res.is_success_code());
        let res = HttpResponse { http_code: 404, ..res };
        assert!(!res.is_success_code());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
