//! Tri-state attribute values
//!
//! A configured field is either not yet known (computed by the API),
//! explicitly null, or holds a value.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Attr<T> {
    /// Value will only be known after the API has answered
    Unknown,
    #[default]
    Null,
    Value(T),
}

impl<T> Attr<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Neither null nor unknown
    pub fn is_known(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone + Default> Attr<T> {
    /// The held value, or the type's zero value when null or unknown
    pub fn value_or_default(&self) -> T {
        self.value().cloned().unwrap_or_default()
    }
}

impl<T> From<Option<T>> for Attr<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::Null,
        }
    }
}

impl From<&str> for Attr<String> {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl<T: fmt::Display> fmt::Display for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("<unknown>"),
            Self::Null => f.write_str("<null>"),
            Self::Value(v) => write!(f, "{}", v),
        }
    }
}
