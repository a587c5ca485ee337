//! # terraform-provider-appclacks
//!
//! Terraform provider for [Appclacks](https://appclacks.com) healthchecks.
//!
//! ## Features
//!
//! - **Five resource types**: DNS, TCP, TLS, HTTP and Command healthchecks
//! - **Flat JSON codec**: one typed model for the API's discriminated, flattened payloads
//! - **Merge-based updates**: envelope patch and full definition sent as one object
//! - **Typed client**: async `reqwest` client with Basic or token authentication and custom TLS
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use appclacks_provider::Provider;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut provider = Provider::new();
//!     provider.configure(json!({"organization_id": "my-org", "token": "my-token"}))?;
//!
//!     let state = provider
//!         .create_resource(
//!             "appclacks_healthcheck_tcp",
//!             json!({"name": "api", "target": "api.example.com", "port": 443}),
//!         )
//!         .await?;
//!     println!("Created {}", state["id"]);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod client;
pub mod provider;
pub mod types;
pub mod utils;

// Re-export main types
pub use client::{AppclacksClient, ClientConfig, ClientError, HealthcheckApi};
pub use provider::{Provider, Resource, ResourceData, ResourceError};
pub use types::{Healthcheck, HealthcheckDefinition, HealthcheckType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git revision the crate was built from
pub const GIT_HASH: &str = env!("GIT_HASH");
