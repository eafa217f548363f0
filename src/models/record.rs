use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shortened link produced by a successful shorten operation.
///
/// Fields are read-only after construction; equality covers every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedRecord {
    id: Uuid,
    original_url: String,
    short_url: String,
    alias: String,
    created_at: DateTime<Utc>,
}

impl ShortenedRecord {
    /// Create a record with a fresh id, stamped now.
    pub fn new(
        original_url: impl Into<String>,
        short_url: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self::with_identity(Uuid::new_v4(), original_url, short_url, alias, Utc::now())
    }

    pub fn with_identity(
        id: Uuid,
        original_url: impl Into<String>,
        short_url: impl Into<String>,
        alias: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url: original_url.into(),
            short_url: short_url.into(),
            alias: alias.into(),
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn short_url(&self) -> &str {
        &self.short_url
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// What the session is currently doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OperationState {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl OperationState {
    pub fn is_loading(&self) -> bool {
        matches!(self, OperationState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            OperationState::Error(message) => Some(message),
            _ => None,
        }
    }
}
