//! Credential Kind Registry - Load credential kind definitions from JSON
//!
//! Each credential kind (AWS, Network, ...) is a declarative descriptor: its
//! credential type id, endpoint and the ordered list of inputs it carries.
//! One generic [`Credential`](super::Credential) is driven by these.

use crate::resource::CallInfo;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded kind definitions (compiled into the binary)
const KINDS_FILE: &str = include_str!("kinds.json");

/// Local type of an input value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    String,
    Int64,
    Bool,
}

/// One field nested under the API's `inputs` object
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: InputType,
    /// The API always answers with a redaction placeholder for this field,
    /// so it is never mapped back from a response
    #[serde(default)]
    pub secret: bool,
    /// Always sent, with the zero value when unset
    #[serde(default)]
    pub required: bool,
}

/// Credential kind definition from JSON
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialKind {
    /// Registry key, e.g. "net"
    #[serde(skip)]
    pub type_name: String,
    /// Display name, matches the credential type name in the API
    pub name: String,
    pub credential_type_id: i64,
    pub endpoint: String,
    pub inputs: Vec<InputField>,
}

impl CredentialKind {
    pub fn input(&self, id: &str) -> Option<&InputField> {
        self.inputs.iter().find(|i| i.id == id)
    }

    /// Base call info for this kind; derive per operation with `with`
    pub fn call_info(&self) -> CallInfo {
        CallInfo::new(&self.name, &self.endpoint, &self.type_name)
    }
}

/// Root structure of kinds.json
#[derive(Debug, Deserialize)]
struct KindsFile {
    kinds: HashMap<String, CredentialKind>,
}

static REGISTRY: OnceLock<HashMap<String, CredentialKind>> = OnceLock::new();

/// Get the kind registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static HashMap<String, CredentialKind> {
    REGISTRY.get_or_init(|| {
        let file: KindsFile = serde_json::from_str(KINDS_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded credential kinds JSON: {}", e));

        file.kinds
            .into_iter()
            .map(|(key, mut kind)| {
                kind.type_name = key.clone();
                (key, kind)
            })
            .collect()
    })
}

/// Get a credential kind by type name
pub fn get_kind(type_name: &str) -> Option<&'static CredentialKind> {
    get_registry().get(type_name)
}

/// All kinds, sorted by type name
pub fn all_kinds() -> Vec<&'static CredentialKind> {
    let mut kinds: Vec<_> = get_registry().values().collect();
    kinds.sort_by(|a, b| a.type_name.cmp(&b.type_name));
    kinds
}
