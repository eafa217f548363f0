pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod repository;
pub mod session;
pub mod usecase;
pub mod validator;

pub use error::{SessionError, ShortenError, TransportError};
pub use models::{OperationState, ShortenedRecord};
pub use session::{Session, SessionHandle, SessionSnapshot};
pub use usecase::ShortenUrl;
pub use validator::UrlValidator;
