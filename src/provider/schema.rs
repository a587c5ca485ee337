//! Attribute schemas for the provider and its resources

use super::validation::Validator;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Default deadline of every lifecycle operation
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Shape of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Bool,
    /// Map of string to string
    StringMap,
    /// Unordered, de-duplicated strings
    StringSet,
    /// Unordered, de-duplicated integers
    IntSet,
    /// Ordered strings
    StringList,
}

impl AttributeType {
    /// Whether `value` has this shape
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Int => value.is_i64(),
            AttributeType::Bool => value.is_boolean(),
            AttributeType::StringMap => value
                .as_object()
                .is_some_and(|map| map.values().all(Value::is_string)),
            AttributeType::StringSet | AttributeType::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            AttributeType::IntSet => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_i64)),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, AttributeType::StringSet | AttributeType::IntSet)
    }
}

/// One attribute of a schema
#[derive(Debug, Clone, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attr_type: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Environment variable consulted when the attribute is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub validators: Vec<Validator>,
}

impl Attribute {
    fn new(attr_type: AttributeType, required: bool, computed: bool) -> Self {
        Self {
            attr_type,
            required,
            optional: !required && !computed,
            computed,
            sensitive: false,
            default: None,
            env_default: None,
            description: None,
            validators: Vec::new(),
        }
    }

    pub fn required_string() -> Self {
        Self::new(AttributeType::String, true, false)
    }

    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, false, false)
    }

    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, false, true)
    }

    pub fn required_int() -> Self {
        Self::new(AttributeType::Int, true, false)
    }

    pub fn optional_bool() -> Self {
        Self::new(AttributeType::Bool, false, false)
    }

    pub fn optional_string_map() -> Self {
        Self::new(AttributeType::StringMap, false, false)
    }

    pub fn optional_string_set() -> Self {
        Self::new(AttributeType::StringSet, false, false)
    }

    pub fn required_int_set() -> Self {
        Self::new(AttributeType::IntSet, true, false)
    }

    pub fn optional_string_list() -> Self {
        Self::new(AttributeType::StringList, false, false)
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_env_default(mut self, variable: impl Into<String>) -> Self {
        self.env_default = Some(variable.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Hide the value from plans and logs
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Computed-only attributes are never user-supplied
    pub fn is_computed_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

/// Per-operation deadlines of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceTimeouts {
    #[serde(serialize_with = "serialize_seconds")]
    pub create: Duration,
    #[serde(serialize_with = "serialize_seconds")]
    pub read: Duration,
    #[serde(serialize_with = "serialize_seconds")]
    pub update: Duration,
    #[serde(serialize_with = "serialize_seconds")]
    pub delete: Duration,
}

impl Default for ResourceTimeouts {
    fn default() -> Self {
        Self::uniform(DEFAULT_OPERATION_TIMEOUT)
    }
}

impl ResourceTimeouts {
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            create: timeout,
            read: timeout,
            update: timeout,
            delete: timeout,
        }
    }
}

fn serialize_seconds<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{}s", duration.as_secs()))
}

/// Schema of the provider block or of one resource type
#[derive(Debug, Clone, Serialize)]
pub struct Schema {
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeouts: Option<ResourceTimeouts>,
}

impl Schema {
    /// Empty schema at version 0
    pub fn v0() -> Self {
        Self {
            version: 0,
            description: None,
            attributes: BTreeMap::new(),
            timeouts: None,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_timeouts(mut self, timeouts: ResourceTimeouts) -> Self {
        self.timeouts = Some(timeouts);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Configured deadlines, or the 10 second default for every operation
    pub fn timeouts(&self) -> ResourceTimeouts {
        self.timeouts.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A user-facing problem attached to a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "{}: {}", attribute, self.summary),
            None => write!(f, "{}", self.summary),
        }
    }
}
