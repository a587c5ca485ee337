use super::{
    ATTR_CACERT, ATTR_CERT, ATTR_INSECURE, ATTR_KEY, ATTR_PORT, ATTR_SERVER_NAME, ATTR_TARGET,
    HealthcheckKind, port_attribute, require_port,
};
use crate::provider::error::Result;
use crate::provider::resource_data::ResourceData;
use crate::provider::schema::{Attribute, Schema};
use crate::provider::validation::Validator;
use crate::types::{HealthcheckDefinition, HealthcheckType, TlsDefinition};

const ATTR_EXPIRATION_DELAY: &str = "expiration_delay";

/// `appclacks_healthcheck_tls`
pub struct TlsKind;

impl HealthcheckKind for TlsKind {
    const KIND: HealthcheckType = HealthcheckType::Tls;
    const TYPE_NAME: &'static str = "appclacks_healthcheck_tls";
    const DESCRIPTION: &'static str = "Perform a TLS handshake and check the certificate";

    type Definition = TlsDefinition;

    fn definition_attributes(schema: Schema) -> Schema {
        schema
            .with_attribute(
                ATTR_TARGET,
                Attribute::required_string()
                    .with_validator(Validator::StringLength { min: 1, max: 255 }),
            )
            .with_attribute(ATTR_PORT, port_attribute())
            .with_attribute(ATTR_KEY, Attribute::optional_string())
            .with_attribute(ATTR_CERT, Attribute::optional_string())
            .with_attribute(ATTR_CACERT, Attribute::optional_string())
            .with_attribute(ATTR_SERVER_NAME, Attribute::optional_string())
            .with_attribute(ATTR_INSECURE, Attribute::optional_bool().with_default(false))
            .with_attribute(
                ATTR_EXPIRATION_DELAY,
                Attribute::optional_string()
                    .with_description("Fail when the certificate expires within this delay"),
            )
    }

    fn expand(data: &ResourceData) -> Result<TlsDefinition> {
        Ok(TlsDefinition {
            target: data.require_str(ATTR_TARGET)?.to_string(),
            port: require_port(data)?,
            key: data.get_string(ATTR_KEY),
            cert: data.get_string(ATTR_CERT),
            cacert: data.get_string(ATTR_CACERT),
            server_name: data.get_string(ATTR_SERVER_NAME),
            insecure: data.get_bool(ATTR_INSECURE).unwrap_or(false),
            expiration_delay: data.get_string(ATTR_EXPIRATION_DELAY),
        })
    }

    fn extract(definition: &HealthcheckDefinition) -> Option<&TlsDefinition> {
        match definition {
            HealthcheckDefinition::Tls(tls) => Some(tls),
            _ => None,
        }
    }

    fn flatten(definition: &TlsDefinition, data: &mut ResourceData) {
        data.set(ATTR_TARGET, definition.target.as_str());
        data.set(ATTR_PORT, definition.port);
        data.set_optional(ATTR_KEY, definition.key.as_deref());
        data.set_optional(ATTR_CERT, definition.cert.as_deref());
        data.set_optional(ATTR_CACERT, definition.cacert.as_deref());
        data.set_optional(ATTR_SERVER_NAME, definition.server_name.as_deref());
        data.set(ATTR_INSECURE, definition.insecure);
        data.set_optional(ATTR_EXPIRATION_DELAY, definition.expiration_delay.as_deref());
    }
}
