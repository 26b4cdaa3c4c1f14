//! Client side of the tax service API.
//!
//! [`ProfileService`] is the contract the wizard codes against;
//! [`HttpProfileClient`] is the reqwest-backed implementation.

pub mod config;
pub mod error;
pub mod http;
pub mod service;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::HttpProfileClient;
pub use service::{FetchOutcome, ProfileService};
