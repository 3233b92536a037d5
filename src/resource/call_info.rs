//! Call context
//!
//! Describes which endpoint an operation targets and where the call came from.
//! The source/callee pair is diagnostic context only; entities may use it to
//! pick a masking policy when mapping API data back.

use serde::Serialize;
use std::fmt;

/// Layer the operation originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    #[default]
    Unknown,
    /// Declarative read-only data lookups
    DataSource,
    /// Stateful managed resources
    Resource,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::DataSource => "data_source",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle phase being executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Callee {
    #[default]
    Unknown,
    Create,
    Read,
    Update,
    Delete,
}

impl Callee {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Information about a resource API call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallInfo {
    /// Display name of the resource, e.g. "Network"
    pub name: String,
    /// Collection endpoint, e.g. "/api/v2/credentials/"
    pub endpoint: String,
    /// Short type identifier, e.g. "net"
    pub type_name: String,
    pub source: Source,
    pub callee: Callee,
}

impl CallInfo {
    pub fn new(name: &str, endpoint: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            endpoint: endpoint.to_string(),
            type_name: type_name.to_string(),
            source: Source::default(),
            callee: Callee::default(),
        }
    }

    /// Derive a copy for a specific source and lifecycle phase
    #[must_use]
    pub fn with(&self, source: Source, callee: Callee) -> Self {
        Self {
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            type_name: self.type_name.clone(),
            source,
            callee,
        }
    }
}

impl fmt::Display for CallInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}/{} on {}",
            self.name, self.type_name, self.source, self.callee, self.endpoint
        )
    }
}
