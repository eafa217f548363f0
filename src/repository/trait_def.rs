use async_trait::async_trait;

use crate::error::ShortenResult;
use crate::models::ShortenedRecord;

#[async_trait]
pub trait ShortenerRepository: Send + Sync {
    /// Ask the service to shorten an already normalized URL.
    async fn shorten(&self, normalized_url: &str) -> ShortenResult<ShortenedRecord>;
}
