use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use super::base::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::config::ApiConfig;

/// A [`Transport`] over reqwest.
///
/// The server keys sessions by an http-only cookie, so the client keeps a
/// cookie jar for as long as this value (or a clone of its client) lives.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        info!(
            "Creating HTTP transport for '{}' (timeout: {:?})",
            config.base_url,
            config.timeout()
        );
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError(format!("Error building HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|e| TransportError(format!("Invalid path '{}': {}", request.path, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    fn get_name(&self) -> &str {
        "http"
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request)?;
        debug!("Sending {} request to: {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(body) = &request.body {
            // Sets `Content-Type: application/json`.
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => return Err(TransportError(format!("Error sending request: {}", e))),
        };
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("Error reading response body: {}", e)))?;

        debug!("Received {} from {} {}", status, request.method, request.path);
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}
