// HTTP implementation of the REST operations
// Author: kelexine (https://github.com/kelexine)

use super::RestOperations;
use crate::config::ClientConfig;
use crate::error::{GatewayError, Result};
use crate::models::{Resource, ResponseEntity};
use crate::utils::logging::sanitize_uri;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response, Url};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error};

/// Client for a JSON REST API.
///
/// Performs the actual network fetch. Relative URIs are resolved against the
/// configured base URL, and HTTP basic credentials are sent when configured.
/// Failures are returned as-is; this client never retries.
#[derive(Clone)]
pub struct HttpRestClient {
    http_client: Client,
    base_url: Option<Url>,
    username: Option<String>,
    password: Option<String>,
}

impl HttpRestClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .build()
            .map_err(|e| GatewayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = if config.base_url.is_empty() {
            None
        } else {
            Some(
                Url::parse(&config.base_url)
                    .map_err(|e| GatewayError::Config(format!("Invalid base_url: {}", e)))?,
            )
        };

        debug!(
            "Created REST client (base URL: {})",
            base_url.as_ref().map(|u| sanitize_uri(u.as_str())).unwrap_or_else(|| "none".to_string())
        );

        Ok(Self {
            http_client,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Resolve a request URI, joining relative ones onto the base URL.
    pub fn resolve(&self, uri: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(uri) {
            return Ok(url);
        }

        match &self.base_url {
            Some(base) => base
                .join(uri)
                .map_err(|e| GatewayError::InvalidUri(format!("{}: {}", uri, e))),
            None => Err(GatewayError::InvalidUri(format!(
                "{}: relative URI and no base_url configured",
                uri
            ))),
        }
    }

    async fn send(&self, uri: &str) -> Result<Response> {
        let url = self.resolve(uri)?;
        debug!("GET {}", sanitize_uri(url.as_str()));

        let mut request = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json");
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("REST API error: HTTP {} for {}", status, sanitize_uri(uri));
            return Err(GatewayError::Status {
                uri: uri.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_body<T: Resource>(uri: &str, response: Response) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Failed to parse response from {}: {}", sanitize_uri(uri), e);
            GatewayError::Json(e)
        })
    }
}

#[async_trait]
impl RestOperations for HttpRestClient {
    async fn get_for_object<T: Resource>(&self, uri: &str) -> Result<T> {
        let response = self.send(uri).await?;
        Self::read_body(uri, response).await
    }

    async fn get_for_entity<T: Resource>(&self, uri: &str) -> Result<ResponseEntity<T>> {
        let response = self.send(uri).await?;
        let status = response.status().as_u16();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = Self::read_body(uri, response).await?;

        Ok(ResponseEntity {
            status,
            headers,
            body,
        })
    }
}
