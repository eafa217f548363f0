//! Boundary toward the shortening service.
//!
//! Everything above this module talks to [`NetworkClient`]; only
//! [`ReqwestClient`] knows about the real HTTP stack.

pub mod client;
pub mod endpoint;
pub mod reqwest_client;

pub use client::{HttpMethod, HttpRequest, HttpResponse, NetworkClient};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use reqwest_client::ReqwestClient;
