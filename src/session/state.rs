use std::time::Duration;

use crate::models::{OperationState, ShortenedRecord};

/// Immutable view of the session, published after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub operation: OperationState,
    pub input: String,
    /// Result of the last debounce evaluation that was allowed to apply.
    pub is_input_valid: bool,
    /// Most recent first.
    pub records: Vec<ShortenedRecord>,
    /// Number of debounce evaluations applied so far.
    pub validations: u64,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Quiet period before input validity is re-evaluated.
    pub debounce: Duration,
    /// How long `Success` stays visible before falling back to `Idle`.
    pub success_display: Duration,
    /// Capacity of the command channel.
    pub command_buffer: usize,
}

impl SessionConfig {
    pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
    pub const DEFAULT_SUCCESS_DISPLAY_MS: u64 = 2_000;
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(Self::DEFAULT_DEBOUNCE_MS),
            success_display: Duration::from_millis(Self::DEFAULT_SUCCESS_DISPLAY_MS),
            command_buffer: 64,
        }
    }
}
