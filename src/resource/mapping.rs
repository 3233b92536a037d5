//! Field mapping engine
//!
//! Applies an ordered list of `(api key, setter, optional sub-payload)`
//! declarations to an API payload. The engine has no masking policy of its
//! own: secret fields the API always returns redacted must simply be left out
//! of the list by whoever assembles it.

use super::attr::Attr;
use super::diagnostics::{Diagnostics, Outcome};
use super::error::Error;
use super::transport::Payload;
use serde_json::Value;

/// Converts a raw API value into one local field
pub type FieldSetter<'a> = Box<dyn FnMut(&Value) -> Outcome + Send + 'a>;

/// Binds one API response key to one local field setter
pub struct FieldMapping<'a> {
    pub api_field: &'a str,
    pub setter: FieldSetter<'a>,
    /// Read the key from this payload instead of the top level one
    pub data: Option<&'a Payload>,
}

impl<'a> FieldMapping<'a> {
    pub fn new<F>(api_field: &'a str, setter: F) -> Self
    where
        F: FnMut(&Value) -> Outcome + Send + 'a,
    {
        Self {
            api_field,
            setter: Box::new(setter),
            data: None,
        }
    }

    /// Read the key from a nested object such as `inputs`
    pub fn nested<F>(api_field: &'a str, data: &'a Payload, setter: F) -> Self
    where
        F: FnMut(&Value) -> Outcome + Send + 'a,
    {
        Self {
            api_field,
            setter: Box::new(setter),
            data: Some(data),
        }
    }
}

impl std::fmt::Debug for FieldMapping<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldMapping")
            .field("api_field", &self.api_field)
            .field("nested", &self.data.is_some())
            .finish()
    }
}

/// Apply `mappings` in order against `data`.
///
/// Setters only run for keys present in their source payload (a present
/// `null` counts). Setter diagnostics are accumulated and never abort the
/// remaining mappings; the result is only an error when there is no payload.
pub fn apply_field_mappings<'a, I>(data: Option<&'a Payload>, mappings: I) -> Outcome
where
    I: IntoIterator<Item = FieldMapping<'a>>,
{
    let mut diags = Diagnostics::new();
    let Some(data) = data else {
        let err = Error::MissingPayload;
        diags.add_error("nil pointer", err.to_string());
        return Outcome::failed(diags, err);
    };

    for mut mapping in mappings {
        let source = mapping.data.unwrap_or(data);
        let Some(value) = source.get(mapping.api_field) else {
            continue;
        };

        let outcome = (mapping.setter)(value);
        if let Err(e) = &outcome.result {
            tracing::trace!("Field {} not applied: {}", mapping.api_field, e);
        }
        diags.append(outcome.diagnostics);
    }

    Outcome::done(diags)
}

/// Name of a JSON value's type, for conversion diagnostics
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn invalid_type(summary: &str, expected: &'static str, value: &Value) -> Outcome {
    let err = Error::InvalidType {
        expected,
        found: json_type_name(value),
    };
    let mut diags = Diagnostics::new();
    diags.add_error(summary, err.to_string());
    Outcome::failed(diags, err)
}

/// Set a string field from a string or number; null clears it
pub fn set_string(obj: &mut Attr<String>, data: &Value) -> Outcome {
    match data {
        Value::Null => *obj = Attr::Null,
        Value::String(s) => *obj = Attr::Value(s.clone()),
        Value::Number(n) => *obj = Attr::Value(n.to_string()),
        other => {
            return invalid_type(
                "wrong data type passed requires string or number",
                "string",
                other,
            )
        }
    }
    Outcome::done(Diagnostics::new())
}

/// Set a 64-bit integer field from an integral number; null clears it
pub fn set_int64(obj: &mut Attr<i64>, data: &Value) -> Outcome {
    match data {
        Value::Null => *obj = Attr::Null,
        Value::Number(n) => match n.as_i64() {
            Some(v) => *obj = Attr::Value(v),
            None => {
                let err = Error::IntConversion {
                    value: n.to_string(),
                };
                let mut diags = Diagnostics::new();
                diags.add_error(format!("failed to convert {} to int64", n), err.to_string());
                return Outcome::failed(diags, err);
            }
        },
        other => return invalid_type("wrong data type passed requires number", "int64", other),
    }
    Outcome::done(Diagnostics::new())
}

/// Set a boolean field; null clears it
pub fn set_bool(obj: &mut Attr<bool>, data: &Value) -> Outcome {
    match data {
        Value::Null => *obj = Attr::Null,
        Value::Bool(b) => *obj = Attr::Value(*b),
        other => return invalid_type("wrong data type passed requires bool", "bool", other),
    }
    Outcome::done(Diagnostics::new())
}
