use super::{ATTR_PORT, ATTR_TARGET, HealthcheckKind, port_attribute, require_port};
use crate::provider::error::Result;
use crate::provider::resource_data::ResourceData;
use crate::provider::schema::{Attribute, Schema};
use crate::provider::validation::Validator;
use crate::types::{HealthcheckDefinition, HealthcheckType, TcpDefinition};

const ATTR_SHOULD_FAIL: &str = "should_fail";

/// `appclacks_healthcheck_tcp`
pub struct TcpKind;

impl HealthcheckKind for TcpKind {
    const KIND: HealthcheckType = HealthcheckType::Tcp;
    const TYPE_NAME: &'static str = "appclacks_healthcheck_tcp";
    const DESCRIPTION: &'static str = "Open a TCP connection to a target";

    type Definition = TcpDefinition;

    fn definition_attributes(schema: Schema) -> Schema {
        schema
            .with_attribute(
                ATTR_TARGET,
                Attribute::required_string()
                    .with_validator(Validator::StringLength { min: 1, max: 255 }),
            )
            .with_attribute(ATTR_PORT, port_attribute())
            .with_attribute(
                ATTR_SHOULD_FAIL,
                Attribute::optional_bool()
                    .with_default(false)
                    .with_description("Succeed only if the connection fails"),
            )
    }

    fn expand(data: &ResourceData) -> Result<TcpDefinition> {
        Ok(TcpDefinition {
            target: data.require_str(ATTR_TARGET)?.to_string(),
            port: require_port(data)?,
            should_fail: data.get_bool(ATTR_SHOULD_FAIL).unwrap_or(false),
        })
    }

    fn extract(definition: &HealthcheckDefinition) -> Option<&TcpDefinition> {
        match definition {
            HealthcheckDefinition::Tcp(tcp) => Some(tcp),
            _ => None,
        }
    }

    fn flatten(definition: &TcpDefinition, data: &mut ResourceData) {
        data.set(ATTR_TARGET, definition.target.as_str());
        data.set(ATTR_PORT, definition.port);
        data.set(ATTR_SHOULD_FAIL, definition.should_fail);
    }
}
