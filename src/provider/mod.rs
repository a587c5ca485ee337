//! Terraform provider
//!
//! Attribute schemas, configuration validation and the lifecycle adapters
//! mapping Terraform resources onto the healthcheck API.

pub mod error;
pub mod healthcheck;
pub mod provider;
pub mod registry;
pub mod resource;
pub mod resource_data;
pub mod schema;
pub mod validation;


pub use error::{ResourceError, Result};
pub use healthcheck::{
    CommandKind, DnsKind, HealthcheckKind, HealthcheckResource, HttpKind, TcpKind, TlsKind,
};
pub use provider::{ENV_API_URL, Provider, SchemaDocument};
pub use registry::ResourceRegistry;
pub use resource::Resource;
pub use resource_data::ResourceData;
pub use schema::{
    Attribute, AttributeType, DEFAULT_OPERATION_TIMEOUT, Diagnostic, ResourceTimeouts, Schema,
    Severity,
};
pub use validation::Validator;
