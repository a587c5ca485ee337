use super::HealthcheckKind;
use crate::provider::error::Result;
use crate::provider::resource_data::ResourceData;
use crate::provider::schema::{Attribute, Schema};
use crate::provider::validation::Validator;
use crate::types::{CommandDefinition, HealthcheckDefinition, HealthcheckType};

const ATTR_COMMAND: &str = "command";
const ATTR_ARGUMENTS: &str = "arguments";

/// `appclacks_healthcheck_command`
pub struct CommandKind;

impl HealthcheckKind for CommandKind {
    const KIND: HealthcheckType = HealthcheckType::Command;
    const TYPE_NAME: &'static str = "appclacks_healthcheck_command";
    const DESCRIPTION: &'static str = "Run a command on the healthcheck runner";

    type Definition = CommandDefinition;

    fn definition_attributes(schema: Schema) -> Schema {
        schema
            .with_attribute(
                ATTR_COMMAND,
                Attribute::required_string()
                    .with_validator(Validator::StringLength { min: 1, max: 512 }),
            )
            .with_attribute(
                ATTR_ARGUMENTS,
                Attribute::optional_string_list().with_description("Arguments, in order"),
            )
    }

    fn expand(data: &ResourceData) -> Result<CommandDefinition> {
        Ok(CommandDefinition {
            command: data.require_str(ATTR_COMMAND)?.to_string(),
            arguments: data.get_string_list(ATTR_ARGUMENTS),
        })
    }

    fn extract(definition: &HealthcheckDefinition) -> Option<&CommandDefinition> {
        match definition {
            HealthcheckDefinition::Command(command) => Some(command),
            _ => None,
        }
    }

    fn flatten(definition: &CommandDefinition, data: &mut ResourceData) {
        data.set(ATTR_COMMAND, definition.command.as_str());
        data.set_string_list(ATTR_ARGUMENTS, &definition.arguments);
    }
}
