use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use super::trait_def::ShortenerRepository;
use crate::error::{ShortenError, ShortenResult};
use crate::models::{ShortenRequest, ShortenResponse, ShortenedRecord};
use crate::network::{Endpoint, HttpRequest, NetworkClient};

/// Repository that talks JSON to the shortening service.
///
/// This is the only place where transport and parse failures are turned
/// into [`ShortenError`] values.
pub struct HttpShortenerRepository {
    client: Arc<dyn NetworkClient>,
    base_url: String,
}

impl HttpShortenerRepository {
    pub fn new(client: Arc<dyn NetworkClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(&self, normalized_url: &str) -> ShortenResult<HttpRequest> {
        let endpoint = Endpoint::Shorten;
        let target = endpoint.url(&self.base_url);
        Url::parse(&target).map_err(|e| {
            warn!(url = %target, error = %e, "malformed endpoint URL");
            ShortenError::DecodingFailure
        })?;

        let body = serde_json::to_vec(&ShortenRequest {
            url: normalized_url,
        })
        .map_err(|_| ShortenError::DecodingFailure)?;

        Ok(HttpRequest::new(endpoint.method(), target)
            .header("Content-Type", "application/json")
            .body(body))
    }
}

#[async_trait]
impl ShortenerRepository for HttpShortenerRepository {
    async fn shorten(&self, normalized_url: &str) -> ShortenResult<ShortenedRecord> {
        let request = self.build_request(normalized_url)?;

        let response = self.client.send(request).await.map_err(|e| {
            warn!(error = %e, "shorten request failed in transport");
            ShortenError::NetworkFailure(e.message)
        })?;

        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            warn!(status = response.status, "shortening service returned an error status");
            return Err(ShortenError::ServerFailure {
                status: response.status,
                body,
            });
        }

        let decoded: ShortenResponse = serde_json::from_slice(&response.body).map_err(|e| {
            warn!(error = %e, "failed to decode shorten response");
            ShortenError::DecodingFailure
        })?;

        debug!(alias = %decoded.alias, "decoded shorten response");
        Ok(decoded.into_record())
    }
}
