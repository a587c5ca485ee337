//! Healthcheck data model
//!
//! The API represents a healthcheck as one flat JSON object: the common
//! envelope fields (`id`, `name`, `labels`, ...) sit next to the fields of
//! exactly one type-specific definition, selected by the `type` discriminant.
//! This module holds the typed model and the codec bridging the two shapes.

pub mod definitions;
pub mod healthcheck;
pub mod inputs;
pub mod merge;


pub use definitions::{
    CommandDefinition, DnsDefinition, HealthcheckDefinition, HttpDefinition, HttpMethod,
    HttpProtocol, TcpDefinition, TlsDefinition,
};
pub use healthcheck::{Healthcheck, HealthcheckType};
pub use inputs::{
    CreateHealthcheckInput, HealthcheckPatch, ListHealthchecksInput, ListHealthchecksOutput,
    Response, UpdateHealthcheckInput,
};
pub use merge::merge_flat;
