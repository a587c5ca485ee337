//! Healthcheck resources
//!
//! All five resource types share one lifecycle implementation,
//! [`HealthcheckResource`], parameterised by a [`HealthcheckKind`] that knows
//! the type-specific attributes and how to convert them to and from the
//! matching definition.

mod command;
mod dns;
mod http;
mod tcp;
mod tls;

pub use command::CommandKind;
pub use dns::DnsKind;
pub use http::HttpKind;
pub use tcp::TcpKind;
pub use tls::TlsKind;

use super::error::{ResourceError, Result};
use super::resource::Resource;
use super::resource_data::ResourceData;
use super::schema::{Attribute, ResourceTimeouts, Schema};
use super::validation::Validator;
use crate::client::{HealthcheckApi, with_deadline, with_deadline_at};
use crate::types::{
    CreateHealthcheckInput, Healthcheck, HealthcheckDefinition, HealthcheckPatch, HealthcheckType,
    UpdateHealthcheckInput,
};
use async_trait::async_trait;
use std::marker::PhantomData;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_INTERVAL: &str = "60s";
pub const DEFAULT_TIMEOUT: &str = "10s";

pub(crate) const ATTR_NAME: &str = "name";
pub(crate) const ATTR_DESCRIPTION: &str = "description";
pub(crate) const ATTR_LABELS: &str = "labels";
pub(crate) const ATTR_INTERVAL: &str = "interval";
pub(crate) const ATTR_TIMEOUT: &str = "timeout";
pub(crate) const ATTR_ENABLED: &str = "enabled";
pub(crate) const ATTR_TARGET: &str = "target";
pub(crate) const ATTR_PORT: &str = "port";
pub(crate) const ATTR_KEY: &str = "key";
pub(crate) const ATTR_CERT: &str = "cert";
pub(crate) const ATTR_CACERT: &str = "cacert";
pub(crate) const ATTR_SERVER_NAME: &str = "server_name";
pub(crate) const ATTR_INSECURE: &str = "insecure";

/// Type-specific half of a healthcheck resource
pub trait HealthcheckKind: Send + Sync + 'static {
    const KIND: HealthcheckType;
    const TYPE_NAME: &'static str;
    const DESCRIPTION: &'static str;

    type Definition: Into<HealthcheckDefinition> + Send;

    /// Add the type-specific attributes to the common schema
    fn definition_attributes(schema: Schema) -> Schema;

    /// Build the definition from configured attributes
    fn expand(data: &ResourceData) -> Result<Self::Definition>;

    /// The matching variant, if `definition` is one
    fn extract(definition: &HealthcheckDefinition) -> Option<&Self::Definition>;

    /// Write definition fields back to `data`
    fn flatten(definition: &Self::Definition, data: &mut ResourceData);
}

/// Lifecycle adapter for one healthcheck type
pub struct HealthcheckResource<K> {
    _kind: PhantomData<fn() -> K>,
}

impl<K: HealthcheckKind> HealthcheckResource<K> {
    pub fn new() -> Self {
        Self { _kind: PhantomData }
    }

    /// Refresh `data` from the API, giving up at `deadline`.
    ///
    /// A missing healthcheck clears the id instead of failing.
    async fn read_until(
        &self,
        api: &dyn HealthcheckApi,
        data: &mut ResourceData,
        deadline: Instant,
        budget: Duration,
    ) -> Result<()> {
        let id = data.require_id()?.to_string();
        debug!(resource = K::TYPE_NAME, id = %id, "Reading healthcheck");

        match with_deadline_at(deadline, budget, api.get_healthcheck(&id)).await {
            Ok(healthcheck) => apply::<K>(&healthcheck, data),
            Err(e) if e.is_not_found() => {
                warn!(resource = K::TYPE_NAME, id = %id, "Healthcheck not found, removing from state");
                data.clear_id();
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<K: HealthcheckKind> Default for HealthcheckResource<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Attributes shared by every healthcheck type
pub fn common_schema(description: &str) -> Schema {
    Schema::v0()
        .with_description(description)
        .with_timeouts(ResourceTimeouts::default())
        .with_attribute("id", Attribute::computed_string())
        .with_attribute(
            ATTR_NAME,
            Attribute::required_string()
                .with_description("Healthcheck name")
                .with_validator(Validator::StringLength { min: 1, max: 255 }),
        )
        .with_attribute(
            ATTR_DESCRIPTION,
            Attribute::optional_string()
                .with_validator(Validator::StringLength { min: 0, max: 255 }),
        )
        .with_attribute(
            ATTR_LABELS,
            Attribute::optional_string_map()
                .with_validator(Validator::MapEntryLength { min: 1, max: 255 }),
        )
        .with_attribute(
            ATTR_INTERVAL,
            Attribute::optional_string()
                .with_default(DEFAULT_INTERVAL)
                .with_description("Delay between two executions"),
        )
        .with_attribute(
            ATTR_TIMEOUT,
            Attribute::optional_string()
                .with_default(DEFAULT_TIMEOUT)
                .with_description("Maximum duration of one execution"),
        )
        .with_attribute(ATTR_ENABLED, Attribute::optional_bool().with_default(true))
}

/// Required port attribute, range-checked
pub(crate) fn port_attribute() -> Attribute {
    Attribute::required_int().with_validator(Validator::IntRange { min: 1, max: 65535 })
}

pub(crate) fn require_port(data: &ResourceData) -> Result<u16> {
    let port = data.require_int(ATTR_PORT)?;
    u16::try_from(port).map_err(|_| ResourceError::attribute(ATTR_PORT, "must be between 1 and 65535"))
}

struct Envelope {
    name: String,
    description: Option<String>,
    labels: std::collections::BTreeMap<String, String>,
    interval: String,
    timeout: String,
    enabled: bool,
}

fn expand_envelope(data: &ResourceData) -> Result<Envelope> {
    Ok(Envelope {
        name: data.require_str(ATTR_NAME)?.to_string(),
        description: data.get_string(ATTR_DESCRIPTION),
        labels: data.get_string_map(ATTR_LABELS),
        interval: data
            .get_string(ATTR_INTERVAL)
            .unwrap_or_else(|| DEFAULT_INTERVAL.to_string()),
        timeout: data
            .get_string(ATTR_TIMEOUT)
            .unwrap_or_else(|| DEFAULT_TIMEOUT.to_string()),
        enabled: data.get_bool(ATTR_ENABLED).unwrap_or(true),
    })
}

/// Copy a fetched healthcheck into `data`. Nothing is written when the
/// healthcheck is of another type.
fn apply<K: HealthcheckKind>(healthcheck: &Healthcheck, data: &mut ResourceData) -> Result<()> {
    let mismatch = || ResourceError::InvalidDefinition {
        expected: K::KIND,
        actual: healthcheck.kind(),
    };
    if healthcheck.kind() != K::KIND {
        return Err(mismatch());
    }
    let definition = K::extract(&healthcheck.definition).ok_or_else(mismatch)?;

    data.set_id(healthcheck.id.as_str());
    data.set(ATTR_NAME, healthcheck.name.as_str());
    data.set_optional(
        ATTR_DESCRIPTION,
        healthcheck.description.as_deref().filter(|d| !d.is_empty()),
    );
    data.set_string_map(ATTR_LABELS, &healthcheck.labels);
    data.set(ATTR_INTERVAL, healthcheck.interval.as_str());
    data.set(ATTR_TIMEOUT, healthcheck.timeout.as_str());
    data.set(ATTR_ENABLED, healthcheck.enabled);
    K::flatten(definition, data);
    Ok(())
}

#[async_trait]
impl<K: HealthcheckKind> Resource for HealthcheckResource<K> {
    fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        K::definition_attributes(common_schema(K::DESCRIPTION))
    }

    async fn create(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()> {
        let envelope = expand_envelope(data)?;
        let input = CreateHealthcheckInput {
            name: envelope.name,
            description: envelope.description,
            labels: envelope.labels,
            interval: envelope.interval,
            timeout: envelope.timeout,
            enabled: envelope.enabled,
            definition: K::expand(data)?.into(),
        };

        // Create and the read that follows share one deadline
        let budget = self.schema().timeouts().create;
        let deadline = Instant::now() + budget;
        let created = with_deadline_at(deadline, budget, api.create_healthcheck(input)).await?;
        info!(resource = K::TYPE_NAME, id = %created.id, "Healthcheck created");

        data.set_id(created.id.as_str());
        self.read_until(api, data, deadline, budget).await
    }

    async fn read(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()> {
        let budget = self.schema().timeouts().read;
        self.read_until(api, data, Instant::now() + budget, budget).await
    }

    async fn update(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()> {
        let id = data.require_id()?.to_string();
        let envelope = expand_envelope(data)?;
        // Description and labels are always sent so removing them clears them
        let patch = HealthcheckPatch {
            name: Some(envelope.name),
            description: Some(envelope.description.unwrap_or_default()),
            labels: Some(envelope.labels),
            interval: Some(envelope.interval),
            timeout: Some(envelope.timeout),
            enabled: Some(envelope.enabled),
        };
        let input = UpdateHealthcheckInput::new(patch, K::expand(data)?);

        let budget = self.schema().timeouts().update;
        let deadline = Instant::now() + budget;
        with_deadline_at(deadline, budget, api.update_healthcheck(&id, input)).await?;
        info!(resource = K::TYPE_NAME, id = %id, "Healthcheck updated");

        self.read_until(api, data, deadline, budget).await
    }

    async fn delete(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()> {
        let id = data.require_id()?.to_string();
        let deadline = self.schema().timeouts().delete;
        with_deadline(deadline, api.delete_healthcheck(&id)).await?;
        info!(resource = K::TYPE_NAME, id = %id, "Healthcheck deleted");
        Ok(())
    }
}
