//! Type-specific healthcheck definitions

use super::healthcheck::HealthcheckType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// DNS resolution check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DnsDefinition {
    /// Domain to resolve
    pub domain: String,
    /// IP addresses expected in the answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expected_ips: Vec<String>,
}

/// TCP connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TcpDefinition {
    pub target: String,
    pub port: u16,
    /// Succeed when the connection fails
    #[serde(default)]
    pub should_fail: bool,
}

/// TLS handshake check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TlsDefinition {
    pub target: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cacert: Option<String>,
    /// Expected to be set unless `insecure` is true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
    #[serde(default)]
    pub insecure: bool,
    /// Fail when the certificate expires within this duration (e.g. `168h`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_delay: Option<String>,
}

/// HTTP method used by HTTP checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    pub const ALL: [&'static str; 5] = ["GET", "POST", "PUT", "DELETE", "HEAD"];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheme used by HTTP checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpProtocol {
    Http,
    #[default]
    Https,
}

impl HttpProtocol {
    pub const ALL: [&'static str; 2] = ["http", "https"];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpProtocol::Http => "http",
            HttpProtocol::Https => "https",
        }
    }
}

impl std::str::FromStr for HttpProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(HttpProtocol::Http),
            "https" => Ok(HttpProtocol::Https),
            other => Err(format!("unsupported protocol: {}", other)),
        }
    }
}

impl fmt::Display for HttpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request check
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpDefinition {
    pub target: String,
    pub port: u16,
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub protocol: HttpProtocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Value of the `Host` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Follow redirects
    #[serde(default)]
    pub redirect: bool,
    /// Status codes considered successful
    pub valid_status: Vec<u16>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Regular expressions the response body must match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body_regexp: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cacert: Option<String>,
    #[serde(default)]
    pub insecure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
}

/// Command executed by the remote runner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandDefinition {
    pub command: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
}

/// The type-specific part of a healthcheck.
///
/// Serializes to the bare field set of the wrapped definition; there is no
/// tag on the wire, the envelope's `type` field plays that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HealthcheckDefinition {
    Dns(DnsDefinition),
    Tcp(TcpDefinition),
    Tls(TlsDefinition),
    Http(HttpDefinition),
    Command(CommandDefinition),
}

impl HealthcheckDefinition {
    /// Discriminant matching this variant
    pub fn kind(&self) -> HealthcheckType {
        match self {
            HealthcheckDefinition::Dns(_) => HealthcheckType::Dns,
            HealthcheckDefinition::Tcp(_) => HealthcheckType::Tcp,
            HealthcheckDefinition::Tls(_) => HealthcheckType::Tls,
            HealthcheckDefinition::Http(_) => HealthcheckType::Http,
            HealthcheckDefinition::Command(_) => HealthcheckType::Command,
        }
    }

    /// Parse the definition fields of `kind` out of a flat healthcheck payload.
    ///
    /// Envelope fields present in `raw` are ignored.
    pub fn decode(kind: HealthcheckType, raw: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            HealthcheckType::Dns => HealthcheckDefinition::Dns(DnsDefinition::deserialize(raw)?),
            HealthcheckType::Tcp => HealthcheckDefinition::Tcp(TcpDefinition::deserialize(raw)?),
            HealthcheckType::Tls => HealthcheckDefinition::Tls(TlsDefinition::deserialize(raw)?),
            HealthcheckType::Http => {
                HealthcheckDefinition::Http(HttpDefinition::deserialize(raw)?)
            }
            HealthcheckType::Command => {
                HealthcheckDefinition::Command(CommandDefinition::deserialize(raw)?)
            }
        })
    }
}

impl From<DnsDefinition> for HealthcheckDefinition {
    fn from(definition: DnsDefinition) -> Self {
        HealthcheckDefinition::Dns(definition)
    }
}

impl From<TcpDefinition> for HealthcheckDefinition {
    fn from(definition: TcpDefinition) -> Self {
        HealthcheckDefinition::Tcp(definition)
    }
}

impl From<TlsDefinition> for HealthcheckDefinition {
    fn from(definition: TlsDefinition) -> Self {
        HealthcheckDefinition::Tls(definition)
    }
}

impl From<HttpDefinition> for HealthcheckDefinition {
    fn from(definition: HttpDefinition) -> Self {
        HealthcheckDefinition::Http(definition)
    }
}

impl From<CommandDefinition> for HealthcheckDefinition {
    fn from(definition: CommandDefinition) -> Self {
        HealthcheckDefinition::Command(definition)
    }
}
