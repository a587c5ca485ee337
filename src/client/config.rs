//! Client configuration
//!
//! Precedence, highest first: explicit builder options, `APPCLACKS_*`
//! environment variables, built-in defaults.

use super::errors::{ClientError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_API_ENDPOINT: &str = "https://api.appclacks.com";

pub const ENV_API_ENDPOINT: &str = "APPCLACKS_API_ENDPOINT";
pub const ENV_USERNAME: &str = "APPCLACKS_USERNAME";
pub const ENV_PASSWORD: &str = "APPCLACKS_PASSWORD";
pub const ENV_ORGANIZATION_ID: &str = "APPCLACKS_ORGANIZATION_ID";
pub const ENV_TOKEN: &str = "APPCLACKS_TOKEN";
pub const ENV_TLS_KEY: &str = "APPCLACKS_TLS_KEY";
pub const ENV_TLS_CERT: &str = "APPCLACKS_TLS_CERT";
pub const ENV_TLS_CACERT: &str = "APPCLACKS_TLS_CACERT";
pub const ENV_TLS_INSECURE: &str = "APPCLACKS_TLS_INSECURE";

/// Client TLS material, all paths to PEM files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub key: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub cacert: Option<PathBuf>,
    /// Skip server certificate verification
    pub insecure: bool,
}

impl TlsConfig {
    pub fn is_enabled(&self) -> bool {
        self.key.is_some() || self.cert.is_some() || self.cacert.is_some() || self.insecure
    }
}

/// How requests authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials<'a> {
    None,
    /// HTTP Basic
    Basic {
        username: &'a str,
        password: &'a str,
    },
    /// Bearer token scoped to an organization
    Token {
        organization_id: Option<&'a str>,
        token: &'a str,
    },
}

/// Configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, without trailing path
    pub endpoint: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub organization_id: Option<String>,
    pub token: Option<String>,
    pub tls: TlsConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_ENDPOINT.to_string(),
            username: None,
            password: None,
            organization_id: None,
            token: None,
            tls: TlsConfig::default(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("organization_id", &self.organization_id)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("tls", &self.tls)
            .finish()
    }
}

impl ClientConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with variables resolved by `lookup`. Empty values
    /// are ignored.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(endpoint) = var(ENV_API_ENDPOINT) {
            config.endpoint = endpoint;
        }
        if let Some(username) = var(ENV_USERNAME) {
            config.username = Some(username);
        }
        if let Some(password) = var(ENV_PASSWORD) {
            config.password = Some(password);
        }
        if let Some(organization_id) = var(ENV_ORGANIZATION_ID) {
            config.organization_id = Some(organization_id);
        }
        if let Some(token) = var(ENV_TOKEN) {
            config.token = Some(token);
        }
        if let Some(key) = var(ENV_TLS_KEY) {
            config.tls.key = Some(PathBuf::from(key));
        }
        if let Some(cert) = var(ENV_TLS_CERT) {
            config.tls.cert = Some(PathBuf::from(cert));
        }
        if let Some(cacert) = var(ENV_TLS_CACERT) {
            config.tls.cacert = Some(PathBuf::from(cacert));
        }
        if var(ENV_TLS_INSECURE).as_deref() == Some("true") {
            config.tls.insecure = true;
        }

        debug!(endpoint = %config.endpoint, "Loaded client configuration from environment");
        config
    }

    /// Builder seeded from the process environment
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::from_config(Self::from_env())
    }

    /// Credentials attached to each request. A username selects Basic auth,
    /// otherwise a token selects bearer auth.
    pub fn credentials(&self) -> Credentials<'_> {
        if let Some(username) = self.username.as_deref() {
            return Credentials::Basic {
                username,
                password: self.password.as_deref().unwrap_or_default(),
            };
        }
        match self.token.as_deref() {
            Some(token) => Credentials::Token {
                organization_id: self.organization_id.as_deref(),
                token,
            },
            None => Credentials::None,
        }
    }

    /// Configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            ClientError::Config(format!("invalid API endpoint '{}': {}", self.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "API endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.tls.key.is_some() != self.tls.cert.is_some() {
            return Err(ClientError::Config(
                "TLS key and certificate must be configured together".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    pub fn basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    pub fn token(
        mut self,
        organization_id: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        self.config.organization_id = Some(organization_id.into());
        self.config.token = Some(token.into());
        self
    }

    pub fn tls_key(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tls.key = Some(path.into());
        self
    }

    pub fn tls_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tls.cert = Some(path.into());
        self
    }

    pub fn tls_cacert(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.tls.cacert = Some(path.into());
        self
    }

    pub fn insecure(mut self, insecure: bool) -> Self {
        self.config.tls.insecure = insecure;
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
