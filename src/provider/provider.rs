//! Provider configuration and resource dispatch

use super::error::{ResourceError, Result};
use super::registry::ResourceRegistry;
use super::resource::Resource;
use super::resource_data::ResourceData;
use super::schema::{Attribute, Diagnostic, Schema};
use crate::client::config::{
    ENV_ORGANIZATION_ID, ENV_PASSWORD, ENV_TLS_CACERT, ENV_TLS_CERT, ENV_TLS_INSECURE,
    ENV_TLS_KEY, ENV_TOKEN, ENV_USERNAME,
};
use crate::client::{
    AppclacksClient, ClientConfig, ClientConfigBuilder, Credentials, DEFAULT_API_ENDPOINT,
    HealthcheckApi,
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Environment variable overriding the API URL of the provider block
pub const ENV_API_URL: &str = "APPCLACKS_API_URL";

const ATTR_API_URL: &str = "api_url";
const ATTR_ORGANIZATION_ID: &str = "organization_id";
const ATTR_TOKEN: &str = "token";
const ATTR_USERNAME: &str = "username";
const ATTR_PASSWORD: &str = "password";
const ATTR_TLS_KEY: &str = "tls_key";
const ATTR_TLS_CERT: &str = "tls_cert";
const ATTR_TLS_CACERT: &str = "tls_cacert";
const ATTR_TLS_INSECURE: &str = "tls_insecure";

/// The `appclacks` provider: its configuration and resource types.
///
/// Resource operations require a configured API handle, installed by
/// [`configure`](Provider::configure) or [`with_api`](Provider::with_api).
pub struct Provider {
    registry: ResourceRegistry,
    api: Option<Arc<dyn HealthcheckApi>>,
}

/// Provider and resource schemas, as printed by the binary
#[derive(Debug, Serialize)]
pub struct SchemaDocument {
    pub provider: Schema,
    pub resource_schemas: BTreeMap<&'static str, Schema>,
}

impl Default for Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider {
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::healthchecks(),
            api: None,
        }
    }

    /// Provider using `api` for every resource operation
    pub fn with_api(api: Arc<dyn HealthcheckApi>) -> Self {
        Self {
            registry: ResourceRegistry::healthchecks(),
            api: Some(api),
        }
    }

    pub fn registry(&self) -> &ResourceRegistry {
        &self.registry
    }

    pub fn resource(&self, type_name: &str) -> Result<&dyn Resource> {
        self.registry.get(type_name)
    }

    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    /// Schema of the `provider "appclacks"` block
    pub fn schema() -> Schema {
        Schema::v0()
            .with_description("Manage Appclacks healthchecks")
            .with_attribute(
                ATTR_API_URL,
                Attribute::optional_string()
                    .with_env_default(ENV_API_URL)
                    .with_default(DEFAULT_API_ENDPOINT)
                    .with_description("The Appclacks API URL"),
            )
            .with_attribute(
                ATTR_ORGANIZATION_ID,
                Attribute::optional_string()
                    .sensitive()
                    .with_env_default(ENV_ORGANIZATION_ID)
                    .with_description("The organization ID to use for the Appclacks API"),
            )
            .with_attribute(
                ATTR_TOKEN,
                Attribute::optional_string()
                    .sensitive()
                    .with_env_default(ENV_TOKEN)
                    .with_description("The token to use for the Appclacks API"),
            )
            .with_attribute(
                ATTR_USERNAME,
                Attribute::optional_string().with_env_default(ENV_USERNAME),
            )
            .with_attribute(
                ATTR_PASSWORD,
                Attribute::optional_string()
                    .sensitive()
                    .with_env_default(ENV_PASSWORD),
            )
            .with_attribute(
                ATTR_TLS_KEY,
                Attribute::optional_string()
                    .with_env_default(ENV_TLS_KEY)
                    .with_description("Path to the client TLS key"),
            )
            .with_attribute(
                ATTR_TLS_CERT,
                Attribute::optional_string()
                    .with_env_default(ENV_TLS_CERT)
                    .with_description("Path to the client TLS certificate"),
            )
            .with_attribute(
                ATTR_TLS_CACERT,
                Attribute::optional_string()
                    .with_env_default(ENV_TLS_CACERT)
                    .with_description("Path to an additional CA certificate"),
            )
            .with_attribute(
                ATTR_TLS_INSECURE,
                Attribute::optional_bool().with_env_default(ENV_TLS_INSECURE),
            )
    }

    /// Configure from the provider block, falling back to the process
    /// environment
    pub fn configure(&mut self, config: Value) -> Result<()> {
        self.configure_with_env(config, |key| std::env::var(key).ok())
    }

    /// Configure with an injectable environment lookup.
    ///
    /// Precedence, highest first: provider block attributes,
    /// `APPCLACKS_API_URL`, the client's `APPCLACKS_*` variables, defaults.
    pub fn configure_with_env<F>(&mut self, config: Value, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_config = Self::client_config(config, &lookup)?;
        debug!(config = ?client_config, "Configuring Appclacks provider");

        let client = AppclacksClient::new(client_config)?;
        info!(endpoint = %client.config().endpoint, "Appclacks provider configured");
        self.api = Some(Arc::new(client));
        Ok(())
    }

    /// Resolve the client configuration of a provider block
    pub fn client_config<F>(config: Value, lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let schema = Self::schema();
        let block = match config {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => {
                return Err(ResourceError::Validation(vec![Diagnostic::error(
                    "provider configuration must be an object",
                )]));
            }
        };
        let diagnostics = schema.validate(&block);
        if !diagnostics.is_empty() {
            return Err(ResourceError::Validation(diagnostics));
        }

        let explicit = |name: &str| block.get(name).filter(|v| !v.is_null());
        let string = |name: &str| {
            explicit(name)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let mut resolved = ClientConfig::from_env_with(&lookup);
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            resolved.endpoint = url;
        }
        if let Some(url) = string(ATTR_API_URL) {
            resolved.endpoint = url;
        }
        if let Some(organization_id) = string(ATTR_ORGANIZATION_ID) {
            resolved.organization_id = Some(organization_id);
        }
        if let Some(token) = string(ATTR_TOKEN) {
            resolved.token = Some(token);
        }
        if let Some(username) = string(ATTR_USERNAME) {
            resolved.username = Some(username);
        }
        if let Some(password) = string(ATTR_PASSWORD) {
            resolved.password = Some(password);
        }
        if let Some(key) = string(ATTR_TLS_KEY) {
            resolved.tls.key = Some(PathBuf::from(key));
        }
        if let Some(cert) = string(ATTR_TLS_CERT) {
            resolved.tls.cert = Some(PathBuf::from(cert));
        }
        if let Some(cacert) = string(ATTR_TLS_CACERT) {
            resolved.tls.cacert = Some(PathBuf::from(cacert));
        }
        if let Some(insecure) = explicit(ATTR_TLS_INSECURE).and_then(Value::as_bool) {
            resolved.tls.insecure = insecure;
        }

        let client_config = ClientConfigBuilder::from_config(resolved).build()?;
        check_credentials(&client_config)?;
        Ok(client_config)
    }

    fn api(&self) -> Result<&dyn HealthcheckApi> {
        self.api.as_deref().ok_or_else(|| {
            ResourceError::Validation(vec![Diagnostic::error("provider is not configured")])
        })
    }

    /// Provider and resource schemas
    pub fn schema_document(&self) -> SchemaDocument {
        SchemaDocument {
            provider: Self::schema(),
            resource_schemas: self
                .registry
                .iter()
                .map(|resource| (resource.type_name(), resource.schema()))
                .collect(),
        }
    }

    /// Create a resource from its configuration and return the new state
    pub async fn create_resource(&self, type_name: &str, config: Value) -> Result<Value> {
        let resource = self.resource(type_name)?;
        let mut data = ResourceData::from_config(&resource.schema(), config)?;
        resource.create(self.api()?, &mut data).await?;
        Ok(data.to_state())
    }

    /// Refresh a resource from its state; `None` when it no longer exists
    pub async fn read_resource(&self, type_name: &str, state: Value) -> Result<Option<Value>> {
        let resource = self.resource(type_name)?;
        let mut data = ResourceData::from_state(&resource.schema(), state)?;
        resource.read(self.api()?, &mut data).await?;
        Ok(data.id().is_some().then(|| data.to_state()))
    }

    /// Apply a new configuration to the resource identified by `id`
    pub async fn update_resource(&self, type_name: &str, id: &str, config: Value) -> Result<Value> {
        let resource = self.resource(type_name)?;
        let mut data = ResourceData::from_config(&resource.schema(), config)?;
        data.set_id(id);
        resource.update(self.api()?, &mut data).await?;
        Ok(data.to_state())
    }

    pub async fn delete_resource(&self, type_name: &str, state: Value) -> Result<()> {
        let resource = self.resource(type_name)?;
        let mut data = ResourceData::from_state(&resource.schema(), state)?;
        resource.delete(self.api()?, &mut data).await
    }

    /// Import an existing healthcheck by name or id
    pub async fn import_resource(&self, type_name: &str, identifier: &str) -> Result<Value> {
        let resource = self.resource(type_name)?;
        let data = resource.import(self.api()?, identifier).await?;
        Ok(data.to_state())
    }
}

fn check_credentials(config: &ClientConfig) -> Result<()> {
    let problem = match config.credentials() {
        Credentials::None => "either token and organization_id, or username, must be configured",
        Credentials::Token {
            organization_id: None,
            ..
        } => "organization_id is required when authenticating with a token",
        _ => return Ok(()),
    };
    Err(ResourceError::Validation(vec![Diagnostic::error(problem)]))
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("registry", &self.registry)
            .field("configured", &self.is_configured())
            .finish()
    }
}
