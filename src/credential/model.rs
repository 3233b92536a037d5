//! Generic credential entity
//!
//! One implementation serves every credential kind; the kind descriptor
//! decides which inputs exist, their types, and which of them are secret.

use super::kind::{CredentialKind, InputType};
use crate::models::CredentialBody;
use crate::resource::{
    apply_field_mappings, set_bool, set_int64, set_string, Attr, Callee, Error, FieldMapping,
    Id, Outcome, Payload, RequestBody, Source, Updater,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder shown instead of secret values
pub const REDACTED: &str = "<sensitive>";

/// Typed value of one credential input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputValue {
    String(Attr<String>),
    Int64(Attr<i64>),
    Bool(Attr<bool>),
}

impl InputValue {
    pub fn null(input_type: InputType) -> Self {
        match input_type {
            InputType::String => Self::String(Attr::Null),
            InputType::Int64 => Self::Int64(Attr::Null),
            InputType::Bool => Self::Bool(Attr::Null),
        }
    }

    /// Parse a raw command line value for the given input type
    pub fn parse(input_type: InputType, raw: &str) -> Result<Self, Error> {
        match input_type {
            InputType::String => Ok(Self::String(Attr::Value(raw.to_string()))),
            InputType::Int64 => raw
                .trim()
                .parse::<i64>()
                .map(|v| Self::Int64(Attr::Value(v)))
                .map_err(|_| Error::IntConversion {
                    value: raw.to_string(),
                }),
            InputType::Bool => raw
                .trim()
                .to_lowercase()
                .parse::<bool>()
                .map(|v| Self::Bool(Attr::Value(v)))
                .map_err(|_| Error::InvalidType {
                    expected: "bool",
                    found: "string",
                }),
        }
    }

    pub fn input_type(&self) -> InputType {
        match self {
            Self::String(_) => InputType::String,
            Self::Int64(_) => InputType::Int64,
            Self::Bool(_) => InputType::Bool,
        }
    }

    pub fn is_known(&self) -> bool {
        match self {
            Self::String(a) => a.is_known(),
            Self::Int64(a) => a.is_known(),
            Self::Bool(a) => a.is_known(),
        }
    }

    fn set_null(&mut self) {
        *self = Self::null(self.input_type());
    }

    fn apply(&mut self, data: &Value) -> Outcome {
        match self {
            Self::String(a) => set_string(a, data),
            Self::Int64(a) => set_int64(a, data),
            Self::Bool(a) => set_bool(a, data),
        }
    }

    /// JSON value for the request body; `required` inputs fall back to
    /// their zero value instead of being omitted
    fn to_json(&self, required: bool) -> Option<Value> {
        match self {
            Self::String(Attr::Value(v)) => Some(json!(v)),
            Self::Int64(Attr::Value(v)) => Some(json!(v)),
            Self::Bool(Attr::Value(v)) => Some(json!(v)),
            Self::String(_) if required => Some(json!("")),
            Self::Int64(_) if required => Some(json!(0)),
            Self::Bool(_) if required => Some(json!(false)),
            _ => None,
        }
    }

    fn to_state(&self) -> Value {
        self.to_json(false).unwrap_or(Value::Null)
    }
}

/// A credential of any kind
#[derive(Clone, PartialEq)]
pub struct Credential {
    kind: &'static CredentialKind,
    pub id: Attr<i64>,
    pub name: Attr<String>,
    pub description: Attr<String>,
    pub organization: Attr<i64>,
    inputs: BTreeMap<String, InputValue>,

    // resolved at create time and never read back from the API
    user_id: Option<i64>,
    credential_type_id: Option<i64>,
}

impl Credential {
    /// A not yet created credential with every field null
    pub fn new(kind: &'static CredentialKind) -> Self {
        let inputs = kind
            .inputs
            .iter()
            .map(|f| (f.id.clone(), InputValue::null(f.input_type)))
            .collect();

        Self {
            kind,
            id: Attr::Unknown,
            name: Attr::Null,
            description: Attr::Null,
            organization: Attr::Null,
            inputs,
            user_id: None,
            credential_type_id: None,
        }
    }

    /// A credential known only by its identity, e.g. before a first read
    pub fn with_id(kind: &'static CredentialKind, id: i64) -> Self {
        let mut credential = Self::new(kind);
        credential.id = Attr::Value(id);
        credential
    }

    pub fn kind(&self) -> &'static CredentialKind {
        self.kind
    }

    pub fn input(&self, id: &str) -> Option<&InputValue> {
        self.inputs.get(id)
    }

    /// Replace an input value; the type must match the kind's declaration
    pub fn set_input(&mut self, id: &str, value: InputValue) -> Result<(), Error> {
        let field = self
            .kind
            .input(id)
            .ok_or_else(|| Error::UnknownInput(id.to_string()))?;
        if field.input_type != value.input_type() {
            return Err(Error::InvalidType {
                expected: type_label(field.input_type),
                found: type_label(value.input_type()),
            });
        }
        self.inputs.insert(id.to_string(), value);
        Ok(())
    }

    /// Parse and set an input from its textual form
    pub fn set_input_str(&mut self, id: &str, raw: &str) -> Result<(), Error> {
        let field = self
            .kind
            .input(id)
            .ok_or_else(|| Error::UnknownInput(id.to_string()))?;
        let value = InputValue::parse(field.input_type, raw)?;
        self.set_input(id, value)
    }

    /// Owning user for the create request; only sent when set
    pub fn set_owner(&mut self, user_id: Option<i64>) {
        self.user_id = user_id;
    }

    pub fn owner(&self) -> Option<i64> {
        self.user_id
    }

    /// Override the kind's default credential type id
    pub fn set_credential_type_id(&mut self, id: i64) {
        self.credential_type_id = Some(id);
    }

    pub fn credential_type_id(&self) -> i64 {
        self.credential_type_id
            .unwrap_or(self.kind.credential_type_id)
    }

    /// Copy of the persisted fields, without the create-time owner and type
    pub fn snapshot(&self) -> Self {
        Self {
            user_id: None,
            credential_type_id: None,
            ..self.clone()
        }
    }

    /// Request body. Once the credential exists, an unset secret means
    /// "keep the stored value" and is left out instead of zeroed.
    pub fn body(&self) -> CredentialBody {
        let persisted = self.id.is_known();
        let mut inputs = Map::new();
        for field in &self.kind.inputs {
            let zero_fill = field.required && !(field.secret && persisted);
            let value = self
                .inputs
                .get(&field.id)
                .and_then(|v| v.to_json(zero_fill));
            if let Some(value) = value {
                inputs.insert(field.id.clone(), value);
            }
        }

        CredentialBody {
            name: self.name.value_or_default(),
            description: self.description.value_or_default(),
            credential_type: self.credential_type_id(),
            inputs,
            user: self.user_id,
            organization: self.organization.value().copied(),
        }
    }

    /// State as JSON with secret inputs redacted
    pub fn to_state_json(&self) -> Value {
        let mut inputs = Map::new();
        for field in &self.kind.inputs {
            let Some(value) = self.inputs.get(&field.id) else {
                continue;
            };
            let shown = if field.secret && value.is_known() {
                json!(REDACTED)
            } else {
                value.to_state()
            };
            inputs.insert(field.id.clone(), shown);
        }

        json!({
            "kind": self.kind.type_name,
            "id": self.id.value(),
            "name": self.name.value(),
            "description": self.description.value(),
            "organization": self.organization.value(),
            "inputs": inputs,
        })
    }
}

fn type_label(input_type: InputType) -> &'static str {
    match input_type {
        InputType::String => "string",
        InputType::Int64 => "int64",
        InputType::Bool => "bool",
    }
}

impl Id for Credential {
    fn id(&self) -> Result<i64, Error> {
        match self.id {
            Attr::Value(id) => Ok(id),
            _ => Err(Error::IdNotSet),
        }
    }
}

impl RequestBody for Credential {
    fn request_body(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&self.body()).map_err(Error::Body)
    }
}

impl Updater for Credential {
    fn update_with_api_data(&mut self, source: Source, callee: Callee, data: &Payload) -> Outcome {
        tracing::trace!(
            "Updating {} credential from API data ({}/{})",
            self.kind.type_name,
            source,
            callee
        );

        let kind = self.kind;
        let Credential {
            id,
            name,
            description,
            organization,
            inputs,
            ..
        } = self;

        let mut mappings = vec![
            FieldMapping::new("id", move |v| set_int64(id, v)),
            FieldMapping::new("name", move |v| set_string(name, v)),
            FieldMapping::new("description", move |v| set_string(description, v)),
            FieldMapping::new("organization", move |v| set_int64(organization, v)),
        ];

        // Secret inputs come back as "$encrypted$"; mapping them would replace
        // the configured value with the placeholder, so they are skipped.
        let nested = data.get("inputs").and_then(Value::as_object);
        for (key, value) in inputs.iter_mut() {
            let secret = kind.input(key).map_or(true, |f| f.secret);
            if secret {
                // nothing configured locally to preserve for lookups
                if source == Source::DataSource {
                    value.set_null();
                }
                continue;
            }
            if let Some(nested) = nested {
                mappings.push(FieldMapping::nested(key.as_str(), nested, move |v| {
                    value.apply(v)
                }));
            }
        }

        apply_field_mappings(Some(data), mappings)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: BTreeMap<&str, String> = self
            .inputs
            .iter()
            .map(|(key, value)| {
                let secret = self.kind.input(key).map_or(true, |i| i.secret);
                let shown = if secret && value.is_known() {
                    REDACTED.to_string()
                } else {
                    format!("{:?}", value)
                };
                (key.as_str(), shown)
            })
            .collect();

        f.debug_struct("Credential")
            .field("kind", &self.kind.type_name)
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("organization", &self.organization)
            .field("inputs", &inputs)
            .field("user_id", &self.user_id)
            .field("credential_type_id", &self.credential_type_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::get_kind;

    fn payload(value: Value) -> Payload {
        value.as_object().cloned().unwrap()
    }

    fn network() -> Credential {
        let mut c = Credential::new(get_kind("net").unwrap());
        c.name = Attr::from("prod");
        c.set_input_str("username", "alice").unwrap();
        c.set_input_str("password", "secret").unwrap();
        c
    }

    #[test]
    fn test_id_requires_known_value() {
        let mut c = network();
        assert!(matches!(c.id(), Err(Error::IdNotSet)));
        c.id = Attr::Null;
        assert!(c.id().is_err());
        c.id = Attr::Value(7);
        assert_eq!(c.id().unwrap(), 7);
    }

    #[test]
    fn test_request_body() {
        let mut c = network();
        c.set_input_str("authorize", "true").unwrap();
        c.set_owner(Some(3));

        let body: Value = serde_json::from_slice(&c.request_body().unwrap()).unwrap();
        assert_eq!(body["name"], "prod");
        assert_eq!(body["description"], "");
        assert_eq!(body["credential_type"], 4);
        assert_eq!(body["user"], 3);
        assert!(body.get("organization").is_none());
        assert_eq!(body["inputs"]["username"], "alice");
        assert_eq!(body["inputs"]["password"], "secret");
        assert_eq!(body["inputs"]["authorize"], true);
        assert!(body["inputs"].get("ssh_key_data").is_none());
    }

    #[test]
    fn test_request_body_sends_required_inputs_and_organization() {
        let mut c = Credential::new(get_kind("aws").unwrap());
        c.organization = Attr::Value(2);
        c.set_credential_type_id(15);

        let body: Value = serde_json::from_slice(&c.request_body().unwrap()).unwrap();
        assert_eq!(body["organization"], 2);
        assert_eq!(body["credential_type"], 15);
        assert_eq!(body["inputs"]["username"], "");
        assert_eq!(body["inputs"]["password"], "");
        assert!(body["inputs"].get("security_token").is_none());
    }

    #[test]
    fn test_update_skips_secret_inputs() {
        let mut c = network();
        let data = payload(json!({
            "id": 7,
            "name": "prod",
            "description": "network devices",
            "organization": null,
            "inputs": {
                "username": "bob",
                "password": "$encrypted$",
                "authorize": true,
                "authorize_password": "$encrypted$"
            }
        }));

        let outcome = c.update_with_api_data(Source::Resource, Callee::Read, &data);
        assert!(!outcome.has_error());
        assert_eq!(c.id, Attr::Value(7));
        assert_eq!(c.description, Attr::from("network devices"));
        assert_eq!(c.organization, Attr::Null);
        assert_eq!(c.input("username"), Some(&InputValue::String(Attr::from("bob"))));
        assert_eq!(c.input("authorize"), Some(&InputValue::Bool(Attr::Value(true))));
        assert_eq!(c.input("password"), Some(&InputValue::String(Attr::from("secret"))));
    }

    #[test]
    fn test_data_source_clears_secret_inputs() {
        let mut c = network();
        let data = payload(json!({"id": 7, "inputs": {"username": "alice", "password": "$encrypted$"}}));

        let outcome = c.update_with_api_data(Source::DataSource, Callee::Read, &data);
        assert!(!outcome.has_error());
        assert_eq!(c.input("password"), Some(&InputValue::String(Attr::Null)));
    }

    #[test]
    fn test_data_source_clears_secret_inputs_without_inputs_object() {
        let mut c = network();
        let data = payload(json!({"id": 7, "name": "prod"}));

        let outcome = c.update_with_api_data(Source::DataSource, Callee::Read, &data);
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(c.input("password"), Some(&InputValue::String(Attr::Null)));
        assert_eq!(c.input("username"), Some(&InputValue::String(Attr::from("alice"))));
    }

    #[test]
    fn test_request_body_omits_unset_secrets_once_persisted() {
        let mut c = Credential::with_id(get_kind("aws").unwrap(), 7);
        c.set_input_str("username", "AKIA").unwrap();

        let body: Value = serde_json::from_slice(&c.request_body().unwrap()).unwrap();
        assert_eq!(body["inputs"]["username"], "AKIA");
        assert!(body["inputs"].get("password").is_none());

        c.set_input_str("password", "rotated").unwrap();
        let body: Value = serde_json::from_slice(&c.request_body().unwrap()).unwrap();
        assert_eq!(body["inputs"]["password"], "rotated");
    }

    #[test]
    fn test_update_reports_type_mismatch_and_continues() {
        let mut c = network();
        let data = payload(json!({"id": "seven", "name": "renamed", "inputs": {"authorize": "yes"}}));

        let outcome = c.update_with_api_data(Source::Resource, Callee::Update, &data);
        assert!(outcome.result.is_ok());
        assert_eq!(outcome.diagnostics.errors().count(), 2);
        assert_eq!(c.name, Attr::from("renamed"));
        assert_eq!(c.id, Attr::Unknown);
    }

    #[test]
    fn test_empty_payload_leaves_fields_untouched() {
        let mut c = network();
        c.organization = Attr::Value(2);
        let before = c.clone();

        let outcome = c.update_with_api_data(Source::Resource, Callee::Read, &Payload::new());
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.result.is_ok());
        assert_eq!(c, before);
    }

    #[test]
    fn test_set_input_validation() {
        let mut c = network();
        assert!(matches!(
            c.set_input_str("nope", "x"),
            Err(Error::UnknownInput(_))
        ));
        assert!(c.set_input_str("authorize", "maybe").is_err());
        assert!(matches!(
            c.set_input("authorize", InputValue::String(Attr::from("true"))),
            Err(Error::InvalidType { expected: "bool", .. })
        ));
    }

    #[test]
    fn test_snapshot_drops_create_time_fields() {
        let mut c = network();
        c.set_owner(Some(3));
        c.set_credential_type_id(40);

        let copy = c.snapshot();
        assert_eq!(copy.owner(), None);
        assert_eq!(copy.credential_type_id(), 4);
        assert_eq!(copy.name, c.name);
        assert_eq!(copy.input("password"), c.input("password"));
    }

    #[test]
    fn test_debug_and_state_redact_secrets() {
        let c = network();
        let debug = format!("{:?}", c);
        assert!(!debug.contains("secret\""));
        assert!(debug.contains(REDACTED));

        let state = c.to_state_json();
        assert_eq!(state["inputs"]["password"], REDACTED);
        assert_eq!(state["inputs"]["username"], "alice");
        assert_eq!(state["inputs"]["ssh_key_data"], Value::Null);
    }
}
