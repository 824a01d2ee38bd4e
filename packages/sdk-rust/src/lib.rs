//! Blocking Rust client for the HProxy proxy-rotation API.

mod audit;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod models;
pub mod options;
mod redact;
pub mod validation;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use endpoint::Endpoint;
pub use error::HProxyError;
pub use options::NewProxyOptions;
