use super::HealthcheckKind;
use crate::provider::error::Result;
use crate::provider::resource_data::ResourceData;
use crate::provider::schema::{Attribute, Schema};
use crate::provider::validation::Validator;
use crate::types::{DnsDefinition, HealthcheckDefinition, HealthcheckType};

const ATTR_DOMAIN: &str = "domain";
const ATTR_EXPECTED_IPS: &str = "expected_ips";

/// `appclacks_healthcheck_dns`
pub struct DnsKind;

impl HealthcheckKind for DnsKind {
    const KIND: HealthcheckType = HealthcheckType::Dns;
    const TYPE_NAME: &'static str = "appclacks_healthcheck_dns";
    const DESCRIPTION: &'static str = "Resolve a domain and optionally compare the answer";

    type Definition = DnsDefinition;

    fn definition_attributes(schema: Schema) -> Schema {
        schema
            .with_attribute(
                ATTR_DOMAIN,
                Attribute::required_string()
                    .with_validator(Validator::StringLength { min: 1, max: 255 }),
            )
            .with_attribute(
                ATTR_EXPECTED_IPS,
                Attribute::optional_string_set()
                    .with_description("IP addresses the domain must resolve to")
                    .with_validator(Validator::ItemCount { min: 0, max: 10 })
                    .with_validator(Validator::EachIp),
            )
    }

    fn expand(data: &ResourceData) -> Result<DnsDefinition> {
        Ok(DnsDefinition {
            domain: data.require_str(ATTR_DOMAIN)?.to_string(),
            expected_ips: data.get_string_list(ATTR_EXPECTED_IPS),
        })
    }

    fn extract(definition: &HealthcheckDefinition) -> Option<&DnsDefinition> {
        match definition {
            HealthcheckDefinition::Dns(dns) => Some(dns),
            _ => None,
        }
    }

    fn flatten(definition: &DnsDefinition, data: &mut ResourceData) {
        data.set(ATTR_DOMAIN, definition.domain.as_str());
        data.set_string_set(ATTR_EXPECTED_IPS, definition.expected_ips.iter().cloned());
    }
}
