//! Attribute store of a single resource instance

use super::error::{ResourceError, Result};
use super::schema::{AttributeType, Diagnostic, Schema};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Attribute values of one resource instance plus its identifier.
///
/// Built from a configuration (or prior state) object, mutated by the
/// lifecycle operations and rendered back to state with [`to_state`].
///
/// [`to_state`]: ResourceData::to_state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceData {
    id: Option<String>,
    values: Map<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a configuration object: schema defaults fill absent
    /// attributes, the result is validated, and sets are normalised.
    ///
    /// An `id` entry, as found in prior state, becomes the identifier.
    pub fn from_config(schema: &Schema, config: Value) -> Result<Self> {
        let (id, values) = split_id(config)?;
        let values = with_defaults(schema, values);

        let diagnostics: Vec<_> = schema
            .validate(&values)
            .into_iter()
            .filter(|d| d.is_error())
            .collect();
        if !diagnostics.is_empty() {
            return Err(ResourceError::Validation(diagnostics));
        }

        Ok(Self::normalised(schema, id, values))
    }

    /// Build from prior state. Values come from the API rather than the
    /// user, so attribute validators do not run.
    pub fn from_state(schema: &Schema, state: Value) -> Result<Self> {
        let (id, values) = split_id(state)?;
        let values = with_defaults(schema, values);
        Ok(Self::normalised(schema, id, values))
    }

    fn normalised(schema: &Schema, id: Option<String>, mut values: Map<String, Value>) -> Self {
        for (name, attribute) in &schema.attributes {
            if let Some(value) = values.get_mut(name) {
                normalise(attribute.attr_type, value);
            }
        }
        Self { id, values }
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
    }

    /// Mark the resource as gone
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn require_id(&self) -> Result<&str> {
        self.id().ok_or(ResourceError::MissingId)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// String value, with empty strings treated as absent
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_str(key)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_string_map(&self, key: &str) -> BTreeMap<String, String> {
        self.get(key)
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Entries of a string set or list, in stored order
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_int_list(&self, key: &str) -> Vec<i64> {
        self.get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default()
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get_str(key)
            .ok_or_else(|| ResourceError::attribute(key, "is required"))
    }

    pub fn require_int(&self, key: &str) -> Result<i64> {
        self.get_int(key)
            .ok_or_else(|| ResourceError::attribute(key, "is required"))
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Store `value`, or null when absent
    pub fn set_optional(&mut self, key: &str, value: Option<impl Into<Value>>) {
        let value = value.map(Into::into).unwrap_or(Value::Null);
        self.values.insert(key.to_string(), value);
    }

    pub fn set_string_map(&mut self, key: &str, map: &BTreeMap<String, String>) {
        let map: Map<String, Value> = map
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        self.values.insert(key.to_string(), Value::Object(map));
    }

    pub fn set_string_list(&mut self, key: &str, items: &[String]) {
        self.set(key, items.to_vec());
    }

    pub fn set_string_set<I, S>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = items.into_iter().map(Into::into).collect();
        items.sort();
        items.dedup();
        self.set(key, items);
    }

    pub fn set_int_set<I>(&mut self, key: &str, items: I)
    where
        I: IntoIterator<Item = i64>,
    {
        let mut items: Vec<i64> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        self.set(key, items);
    }

    /// State object: every attribute plus `id` (null once cleared)
    pub fn to_state(&self) -> Value {
        let mut state = self.values.clone();
        state.insert(
            "id".to_string(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );
        Value::Object(state)
    }
}

fn split_id(object: Value) -> Result<(Option<String>, Map<String, Value>)> {
    let mut values = match object {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        _ => {
            return Err(ResourceError::Validation(vec![Diagnostic::error(
                "configuration must be an object",
            )]));
        }
    };
    let id = match values.remove("id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id),
        _ => None,
    };
    Ok((id, values))
}

fn with_defaults(schema: &Schema, mut values: Map<String, Value>) -> Map<String, Value> {
    for (name, attribute) in &schema.attributes {
        let absent = values.get(name).is_none_or(Value::is_null);
        if absent {
            if let Some(default) = &attribute.default {
                values.insert(name.clone(), default.clone());
            }
        }
    }
    values
}

fn normalise(attr_type: AttributeType, value: &mut Value) {
    if !attr_type.is_set() {
        return;
    }
    if let Value::Array(items) = value {
        match attr_type {
            AttributeType::IntSet => items.sort_by_key(|v| v.as_i64()),
            _ => items.sort_by(|a, b| a.as_str().cmp(&b.as_str())),
        }
        items.dedup();
    }
}
