//! JSON bodies exchanged with the shortening service.

use serde::{Deserialize, Serialize};

use super::record::ShortenedRecord;

#[derive(Debug, Clone, Serialize)]
pub struct ShortenRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShortenResponse {
    pub alias: String,
    #[serde(rename = "_links")]
    pub links: ShortenLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShortenLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub short: String,
}

impl ShortenResponse {
    /// Map into a domain record. The service supplies neither an id nor a
    /// timestamp, so both are stamped here.
    pub fn into_record(self) -> ShortenedRecord {
        ShortenedRecord::new(self.links.self_link, self.links.short, self.alias)
    }
}
