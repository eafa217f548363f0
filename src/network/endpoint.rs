use std::fmt;

use super::client::HttpMethod;

pub const DEFAULT_BASE_URL: &str = "https://url-shortener-server.onrender.com/api";

/// Routes exposed by the shortening service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `POST /alias`
    Shorten,
    /// `GET /alias/{alias}`. Addressable but unused by the shorten flow.
    Lookup { alias: String },
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::Shorten => HttpMethod::Post,
            Endpoint::Lookup { .. } => HttpMethod::Get,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Shorten => "/alias".to_string(),
            Endpoint::Lookup { alias } => format!("/alias/{alias}"),
        }
    }

    /// Join `base` and the endpoint path.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
