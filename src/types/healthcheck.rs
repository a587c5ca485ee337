//! Healthcheck envelope and its flat JSON codec

use super::definitions::HealthcheckDefinition;
use super::merge::merge_flat;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Discriminant selecting the definition variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthcheckType {
    Dns,
    Tcp,
    Tls,
    Http,
    Command,
}

impl HealthcheckType {
    pub const ALL: [HealthcheckType; 5] = [
        HealthcheckType::Dns,
        HealthcheckType::Tcp,
        HealthcheckType::Tls,
        HealthcheckType::Http,
        HealthcheckType::Command,
    ];

    /// Wire value of the discriminant, also used as the create/update path segment
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthcheckType::Dns => "dns",
            HealthcheckType::Tcp => "tcp",
            HealthcheckType::Tls => "tls",
            HealthcheckType::Http => "http",
            HealthcheckType::Command => "command",
        }
    }
}

impl fmt::Display for HealthcheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthcheckType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthcheckType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown healthcheck type {}", s))
    }
}

/// A healthcheck as returned by the API
#[derive(Debug, Clone, PartialEq)]
pub struct Healthcheck {
    /// Server-assigned identifier, immutable
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub labels: BTreeMap<String, String>,
    /// Duration string, e.g. `30s`
    pub interval: String,
    /// Duration string, e.g. `5s`
    pub timeout: String,
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub definition: HealthcheckDefinition,
}

impl Healthcheck {
    /// The `type` discriminant, always consistent with [`Healthcheck::definition`]
    pub fn kind(&self) -> HealthcheckType {
        self.definition.kind()
    }
}

/// Envelope fields as read from the wire. Unknown fields, including every
/// definition field, are ignored.
#[derive(Deserialize)]
struct EnvelopeIn {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    interval: String,
    #[serde(default)]
    timeout: String,
    #[serde(default)]
    enabled: bool,
    #[serde(rename = "created-at", default)]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(rename = "type")]
    kind: HealthcheckType,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    labels: &'a BTreeMap<String, String>,
    interval: &'a str,
    timeout: &'a str,
    enabled: bool,
    #[serde(rename = "created-at", skip_serializing_if = "Option::is_none")]
    created_at: Option<&'a DateTime<Utc>>,
}

impl<'de> Deserialize<'de> for Healthcheck {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;

        // First pass: the fixed envelope.
        let envelope = EnvelopeIn::deserialize(&raw).map_err(D::Error::custom)?;
        let kind = HealthcheckType::from_str(&envelope.kind).map_err(D::Error::custom)?;

        // Second pass: the same payload against the variant selected by `type`.
        let definition = HealthcheckDefinition::decode(kind, &raw).map_err(D::Error::custom)?;

        Ok(Healthcheck {
            id: envelope.id,
            name: envelope.name,
            description: envelope.description,
            labels: envelope.labels.unwrap_or_default(),
            interval: envelope.interval,
            timeout: envelope.timeout,
            enabled: envelope.enabled,
            created_at: envelope.created_at,
            definition,
        })
    }
}

impl Serialize for Healthcheck {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let envelope = EnvelopeOut {
            id: &self.id,
            name: &self.name,
            description: self.description.as_deref(),
            kind: self.kind(),
            labels: &self.labels,
            interval: &self.interval,
            timeout: &self.timeout,
            enabled: self.enabled,
            created_at: self.created_at.as_ref(),
        };

        merge_flat(&envelope, &self.definition)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
