//! Request and response payloads of the healthcheck endpoints

use super::definitions::HealthcheckDefinition;
use super::healthcheck::{Healthcheck, HealthcheckType};
use super::merge::merge_flat;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Body of `POST /api/v1/healthcheck/{type}`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateHealthcheckInput {
    pub name: String,
    pub description: Option<String>,
    pub labels: BTreeMap<String, String>,
    pub interval: String,
    pub timeout: String,
    pub enabled: bool,
    pub definition: HealthcheckDefinition,
}

#[derive(Serialize)]
struct CreateEnvelope<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    labels: &'a BTreeMap<String, String>,
    interval: &'a str,
    timeout: &'a str,
    enabled: bool,
}

impl CreateHealthcheckInput {
    pub fn kind(&self) -> HealthcheckType {
        self.definition.kind()
    }

    /// Flat JSON object sent on the wire
    pub fn to_payload(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let envelope = CreateEnvelope {
            name: &self.name,
            description: self.description.as_deref(),
            labels: &self.labels,
            interval: &self.interval,
            timeout: &self.timeout,
            enabled: self.enabled,
        };
        merge_flat(&envelope, &self.definition)
    }
}

impl Serialize for CreateHealthcheckInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_payload()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Envelope fields to change on update. `None` leaves a field out of the
/// request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthcheckPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Body of `PUT /api/v1/healthcheck/{type}/{id}`.
///
/// The definition is always sent in full; only the envelope is partial.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateHealthcheckInput {
    pub patch: HealthcheckPatch,
    pub definition: HealthcheckDefinition,
}

impl UpdateHealthcheckInput {
    pub fn new(patch: HealthcheckPatch, definition: impl Into<HealthcheckDefinition>) -> Self {
        Self {
            patch,
            definition: definition.into(),
        }
    }

    pub fn kind(&self) -> HealthcheckType {
        self.definition.kind()
    }

    /// Merge the envelope patch and the definition into one flat object
    pub fn to_payload(&self) -> Result<Map<String, Value>, serde_json::Error> {
        merge_flat(&self.patch, &self.definition)
    }
}

impl Serialize for UpdateHealthcheckInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_payload()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Filters for `GET /api/v1/healthcheck`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListHealthchecksInput {
    /// Regular expression matched against healthcheck names
    pub name_pattern: Option<String>,
}

impl ListHealthchecksInput {
    pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(pattern) = self.name_pattern.as_deref().filter(|p| !p.is_empty()) {
            params.push(("name-pattern", pattern.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListHealthchecksOutput {
    #[serde(default)]
    pub result: Vec<Healthcheck>,
}

/// Generic acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub messages: Vec<String>,
}
