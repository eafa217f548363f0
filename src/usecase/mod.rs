//! The single gate between raw user input and the network.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ShortenError, ShortenResult};
use crate::models::ShortenedRecord;
use crate::repository::ShortenerRepository;
use crate::validator::UrlValidator;

#[derive(Clone)]
pub struct ShortenUrl {
    repository: Arc<dyn ShortenerRepository>,
    validator: UrlValidator,
}

impl ShortenUrl {
    pub fn new(repository: Arc<dyn ShortenerRepository>, validator: UrlValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    pub fn validator(&self) -> &UrlValidator {
        &self.validator
    }

    /// Validate, normalize and shorten `raw_url`.
    ///
    /// Invalid input never reaches the repository. Repository errors are
    /// returned as-is.
    pub async fn execute(&self, raw_url: &str) -> ShortenResult<ShortenedRecord> {
        if !self.validator.is_valid(raw_url) {
            debug!(input = %raw_url, "rejected invalid URL before any I/O");
            return Err(ShortenError::InvalidInput);
        }

        let normalized = self.validator.normalize(raw_url);
        let record = self.repository.shorten(&normalized).await?;

        info!(alias = %record.alias(), short_url = %record.short_url(), "shortened {}", normalized);
        Ok(record)
    }
}
