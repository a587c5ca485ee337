//! Appclacks API client
//!
//! Authenticated JSON-over-HTTPS access to the healthcheck endpoints. The
//! client owns configuration only; requests are independent and carry no
//! shared mutable state.

mod api;
mod client;
pub mod config;
pub mod errors;
mod tls;


pub use api::HealthcheckApi;
#[cfg(test)]
pub use api::MockHealthcheckApi;
pub use client::{AppclacksClient, ORGANIZATION_HEADER, with_deadline, with_deadline_at};
pub use config::{ClientConfig, ClientConfigBuilder, Credentials, DEFAULT_API_ENDPOINT, TlsConfig};
pub use errors::{ClientError, Result};
