//! Error handling

use super::schema::Diagnostic;
use crate::client::ClientError;
use crate::types::HealthcheckType;
use thiserror::Error;

/// Errors raised by resource lifecycle operations
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The configuration failed schema validation; nothing was sent
    #[error("invalid configuration: {}", join_diagnostics(.0))]
    Validation(Vec<Diagnostic>),

    /// The API returned a healthcheck of another type than the resource manages
    #[error("Invalid healthcheck type. Expecting {expected}, got {actual}")]
    InvalidDefinition {
        expected: HealthcheckType,
        actual: HealthcheckType,
    },

    #[error("resource has no id")]
    MissingId,

    #[error("unknown resource type {0}")]
    UnknownResource(String),

    #[error("invalid attribute {name}: {message}")]
    Attribute { name: String, message: String },

    #[error("cannot import {resource}: healthcheck {identifier} not found")]
    ImportNotFound {
        resource: &'static str,
        identifier: String,
    },
}

/// Provider result type
pub type Result<T> = std::result::Result<T, ResourceError>;

impl ResourceError {
    pub fn attribute(name: impl Into<String>, message: impl Into<String>) -> Self {
        ResourceError::Attribute {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::Client(e) if e.is_not_found())
    }
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
