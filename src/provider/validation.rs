//! Attribute validation
//!
//! Validation runs on the configuration before any resource code, so an
//! invalid configuration never reaches the API.

use super::schema::{Diagnostic, Schema};
use regex::Regex;
use serde_json::{Map, Value};
use std::net::IpAddr;

/// Constraint attached to an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// String length in characters, inclusive
    StringLength { min: usize, max: usize },
    /// Integer value, inclusive
    IntRange { min: i64, max: i64 },
    /// String must be one of the listed values
    OneOf(&'static [&'static str]),
    /// Number of entries of a set, list or map, inclusive
    ItemCount { min: usize, max: usize },
    /// Every entry parses as an IPv4 or IPv6 address
    EachIp,
    /// Every entry is an integer within the bounds
    EachIntRange { min: i64, max: i64 },
    /// Every entry compiles as a regular expression
    EachRegex,
    /// Every key and value of a map has a length within the bounds
    MapEntryLength { min: usize, max: usize },
}

impl Validator {
    /// Check `value`, which already has the attribute's declared type
    pub fn check(&self, value: &Value) -> Result<(), String> {
        match self {
            Validator::StringLength { min, max } => {
                let len = value.as_str().map(|s| s.chars().count()).unwrap_or_default();
                if len < *min || len > *max {
                    return Err(format!(
                        "expected length to be in the range ({} - {}), got {}",
                        min, max, len
                    ));
                }
            }
            Validator::IntRange { min, max } => {
                let number = as_integer(value)?;
                if number < *min || number > *max {
                    return Err(format!(
                        "expected to be in the range ({} - {}), got {}",
                        min, max, number
                    ));
                }
            }
            Validator::OneOf(allowed) => {
                let s = value.as_str().unwrap_or_default();
                if !allowed.contains(&s) {
                    return Err(format!("expected to be one of {:?}, got {}", allowed, s));
                }
            }
            Validator::ItemCount { min, max } => {
                let count = match value {
                    Value::Array(items) => items.len(),
                    Value::Object(map) => map.len(),
                    _ => 0,
                };
                if count < *min || count > *max {
                    return Err(format!(
                        "expected between {} and {} items, got {}",
                        min, max, count
                    ));
                }
            }
            Validator::EachIp => {
                for item in items(value) {
                    let s = item.as_str().unwrap_or_default();
                    if s.parse::<IpAddr>().is_err() {
                        return Err(format!("expected a valid IP address, got {}", s));
                    }
                }
            }
            Validator::EachIntRange { min, max } => {
                for item in items(value) {
                    let number = as_integer(item)?;
                    if number < *min || number > *max {
                        return Err(format!(
                            "expected every item to be in the range ({} - {}), got {}",
                            min, max, number
                        ));
                    }
                }
            }
            Validator::EachRegex => {
                for item in items(value) {
                    let s = item.as_str().unwrap_or_default();
                    if let Err(e) = Regex::new(s) {
                        return Err(format!("invalid regular expression {}: {}", s, e));
                    }
                }
            }
            Validator::MapEntryLength { min, max } => {
                if let Some(map) = value.as_object() {
                    for (key, entry) in map {
                        let key_len = key.chars().count();
                        let value_len = entry.as_str().map(|s| s.chars().count()).unwrap_or_default();
                        if key_len < *min || key_len > *max {
                            return Err(format!(
                                "key {} length must be in the range ({} - {})",
                                key, min, max
                            ));
                        }
                        if value_len < *min || value_len > *max {
                            return Err(format!(
                                "value of {} length must be in the range ({} - {})",
                                key, min, max
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn as_integer(value: &Value) -> Result<i64, String> {
    value
        .as_i64()
        .ok_or_else(|| format!("expected a 64-bit signed integer, got {}", value))
}

fn items(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

impl Schema {
    /// Validate a configuration object, collecting every problem found.
    ///
    /// Null values count as absent.
    pub fn validate(&self, config: &Map<String, Value>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for name in config.keys() {
            if !self.attributes.contains_key(name) {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Unsupported argument: an argument named \"{}\" is not expected here",
                        name
                    ))
                    .with_attribute(name.as_str()),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let value = config.get(name).filter(|v| !v.is_null());
            let Some(value) = value else {
                if attribute.required {
                    diagnostics.push(
                        Diagnostic::error(format!(
                            "Missing required argument: the argument \"{}\" is required",
                            name
                        ))
                        .with_attribute(name.as_str()),
                    );
                }
                continue;
            };

            if !attribute.attr_type.matches(value) {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Incorrect attribute value type: expected {:?}",
                        attribute.attr_type
                    ))
                    .with_attribute(name.as_str()),
                );
                continue;
            }

            for validator in &attribute.validators {
                if let Err(message) = validator.check(value) {
                    diagnostics.push(Diagnostic::error(message).with_attribute(name.as_str()));
                }
            }
        }

        diagnostics
    }
}
