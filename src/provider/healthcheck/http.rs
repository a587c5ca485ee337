use super::{
    ATTR_CACERT, ATTR_CERT, ATTR_INSECURE, ATTR_KEY, ATTR_PORT, ATTR_SERVER_NAME, ATTR_TARGET,
    HealthcheckKind, port_attribute, require_port,
};
use crate::provider::error::{ResourceError, Result};
use crate::provider::resource_data::ResourceData;
use crate::provider::schema::{Attribute, Schema};
use crate::provider::validation::Validator;
use crate::types::{HealthcheckDefinition, HealthcheckType, HttpDefinition, HttpMethod, HttpProtocol};

const ATTR_METHOD: &str = "method";
const ATTR_PROTOCOL: &str = "protocol";
const ATTR_PATH: &str = "path";
const ATTR_HOST: &str = "host";
const ATTR_REDIRECT: &str = "redirect";
const ATTR_VALID_STATUS: &str = "valid_status";
const ATTR_BODY: &str = "body";
const ATTR_BODY_REGEXP: &str = "body_regexp";
const ATTR_HEADERS: &str = "headers";
const ATTR_QUERY: &str = "query";

/// `appclacks_healthcheck_http`
pub struct HttpKind;

impl HealthcheckKind for HttpKind {
    const KIND: HealthcheckType = HealthcheckType::Http;
    const TYPE_NAME: &'static str = "appclacks_healthcheck_http";
    const DESCRIPTION: &'static str = "Send an HTTP request and check the response";

    type Definition = HttpDefinition;

    fn definition_attributes(schema: Schema) -> Schema {
        schema
            .with_attribute(
                ATTR_TARGET,
                Attribute::required_string()
                    .with_validator(Validator::StringLength { min: 1, max: 255 }),
            )
            .with_attribute(ATTR_PORT, port_attribute())
            .with_attribute(
                ATTR_VALID_STATUS,
                Attribute::required_int_set()
                    .with_description("Status codes considered successful")
                    .with_validator(Validator::ItemCount { min: 1, max: 20 })
                    .with_validator(Validator::EachIntRange { min: 0, max: 1000 }),
            )
            .with_attribute(
                ATTR_METHOD,
                Attribute::optional_string()
                    .with_default(HttpMethod::default().as_str())
                    .with_validator(Validator::OneOf(&HttpMethod::ALL)),
            )
            .with_attribute(
                ATTR_PROTOCOL,
                Attribute::optional_string()
                    .with_default(HttpProtocol::default().as_str())
                    .with_validator(Validator::OneOf(&HttpProtocol::ALL)),
            )
            .with_attribute(ATTR_PATH, Attribute::optional_string())
            .with_attribute(
                ATTR_HOST,
                Attribute::optional_string().with_description("Value of the Host header"),
            )
            .with_attribute(ATTR_REDIRECT, Attribute::optional_bool().with_default(false))
            .with_attribute(ATTR_BODY, Attribute::optional_string())
            .with_attribute(
                ATTR_BODY_REGEXP,
                Attribute::optional_string_set()
                    .with_description("Regular expressions the response body must match")
                    .with_validator(Validator::ItemCount { min: 0, max: 3 })
                    .with_validator(Validator::EachRegex),
            )
            .with_attribute(
                ATTR_HEADERS,
                Attribute::optional_string_map()
                    .with_validator(Validator::ItemCount { min: 0, max: 20 }),
            )
            .with_attribute(
                ATTR_QUERY,
                Attribute::optional_string_map()
                    .with_validator(Validator::ItemCount { min: 0, max: 20 }),
            )
            .with_attribute(ATTR_KEY, Attribute::optional_string())
            .with_attribute(ATTR_CERT, Attribute::optional_string())
            .with_attribute(ATTR_CACERT, Attribute::optional_string())
            .with_attribute(ATTR_INSECURE, Attribute::optional_bool().with_default(false))
            .with_attribute(ATTR_SERVER_NAME, Attribute::optional_string())
    }

    fn expand(data: &ResourceData) -> Result<HttpDefinition> {
        let method = match data.get_str(ATTR_METHOD) {
            Some(method) => method
                .parse()
                .map_err(|e: String| ResourceError::attribute(ATTR_METHOD, e))?,
            None => HttpMethod::default(),
        };
        let protocol = match data.get_str(ATTR_PROTOCOL) {
            Some(protocol) => protocol
                .parse()
                .map_err(|e: String| ResourceError::attribute(ATTR_PROTOCOL, e))?,
            None => HttpProtocol::default(),
        };
        let valid_status = data
            .get_int_list(ATTR_VALID_STATUS)
            .into_iter()
            .map(|status| {
                u16::try_from(status).map_err(|_| {
                    ResourceError::attribute(ATTR_VALID_STATUS, format!("invalid status {}", status))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(HttpDefinition {
            target: data.require_str(ATTR_TARGET)?.to_string(),
            port: require_port(data)?,
            method,
            protocol,
            path: data.get_string(ATTR_PATH),
            host: data.get_string(ATTR_HOST),
            redirect: data.get_bool(ATTR_REDIRECT).unwrap_or(false),
            valid_status,
            query: data.get_string_map(ATTR_QUERY),
            headers: data.get_string_map(ATTR_HEADERS),
            body: data.get_string(ATTR_BODY),
            body_regexp: data.get_string_list(ATTR_BODY_REGEXP),
            key: data.get_string(ATTR_KEY),
            cert: data.get_string(ATTR_CERT),
            cacert: data.get_string(ATTR_CACERT),
            insecure: data.get_bool(ATTR_INSECURE).unwrap_or(false),
            server_name: data.get_string(ATTR_SERVER_NAME),
        })
    }

    fn extract(definition: &HealthcheckDefinition) -> Option<&HttpDefinition> {
        match definition {
            HealthcheckDefinition::Http(http) => Some(http),
            _ => None,
        }
    }

    fn flatten(definition: &HttpDefinition, data: &mut ResourceData) {
        data.set(ATTR_TARGET, definition.target.as_str());
        data.set(ATTR_PORT, definition.port);
        data.set(ATTR_METHOD, definition.method.as_str());
        data.set(ATTR_PROTOCOL, definition.protocol.as_str());
        data.set_optional(ATTR_PATH, definition.path.as_deref());
        data.set_optional(ATTR_HOST, definition.host.as_deref());
        data.set(ATTR_REDIRECT, definition.redirect);
        data.set_int_set(
            ATTR_VALID_STATUS,
            definition.valid_status.iter().map(|s| i64::from(*s)),
        );
        data.set_optional(ATTR_BODY, definition.body.as_deref());
        data.set_string_set(ATTR_BODY_REGEXP, definition.body_regexp.iter().cloned());
        data.set_string_map(ATTR_HEADERS, &definition.headers);
        data.set_string_map(ATTR_QUERY, &definition.query);
        data.set_optional(ATTR_KEY, definition.key.as_deref());
        data.set_optional(ATTR_CERT, definition.cert.as_deref());
        data.set_optional(ATTR_CACERT, definition.cacert.as_deref());
        data.set(ATTR_INSECURE, definition.insecure);
        data.set_optional(ATTR_SERVER_NAME, definition.server_name.as_deref());
    }
}
