pub mod record;
pub mod wire;

pub use record::{OperationState, ShortenedRecord};
pub use wire::{ShortenLinks, ShortenRequest, ShortenResponse};
