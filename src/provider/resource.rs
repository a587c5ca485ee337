//! Resource lifecycle contract

use super::error::{ResourceError, Result};
use super::resource_data::ResourceData;
use super::schema::Schema;
use crate::client::HealthcheckApi;
use async_trait::async_trait;
use tracing::debug;

/// A managed resource type.
///
/// Operations receive the configured API handle rather than owning it, so one
/// registry serves any number of provider configurations.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Terraform type name, e.g. `appclacks_healthcheck_tcp`
    fn type_name(&self) -> &'static str;

    fn schema(&self) -> Schema;

    /// Create the remote object, then refresh `data` from it
    async fn create(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()>;

    /// Refresh `data`; clears the id when the remote object is gone
    async fn read(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()>;

    /// Push `data` to the remote object, then refresh it
    async fn update(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()>;

    async fn delete(&self, api: &dyn HealthcheckApi, data: &mut ResourceData) -> Result<()>;

    /// Adopt an existing remote object by name or id
    async fn import(&self, api: &dyn HealthcheckApi, identifier: &str) -> Result<ResourceData> {
        debug!(resource = self.type_name(), identifier, "Importing resource");
        let mut data = ResourceData::new();
        data.set_id(identifier);
        self.read(api, &mut data).await?;
        if data.id().is_none() {
            return Err(ResourceError::ImportNotFound {
                resource: self.type_name(),
                identifier: identifier.to_string(),
            });
        }
        Ok(data)
    }
}
