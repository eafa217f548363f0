pub mod http;
pub mod trait_def;

pub use http::HttpShortenerRepository;
pub use trait_def::ShortenerRepository;
