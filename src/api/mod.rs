pub mod backend;
pub mod http;
pub mod model;

#[cfg(test)]
pub mod fake;

pub use backend::Backend;
pub use http::HttpBackend;
pub use model::*;
