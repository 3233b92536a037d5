//! Error types for the resource lifecycle and its transport

use thiserror::Error;

/// Failure reported by a [`Transport`](super::Transport) implementation.
///
/// Status code interpretation belongs to the transport; the lifecycle
/// operations forward these errors unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint could not be turned into a valid URL
    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Building or sending the request failed
    #[error("failed to do request: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not a JSON object
    #[error("failed to decode data: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with a non-2xx status
    #[error("invalid status code: {status}, on {uri} with {body}")]
    InvalidStatusCode {
        status: u16,
        uri: String,
        body: String,
    },
}

impl TransportError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidStatusCode { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Error returned by the lifecycle operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("client is nil")]
    MissingTransport,

    /// The named input (entity, updater) was not supplied
    #[error("{0} is nil")]
    MissingInput(&'static str),

    #[error("name is empty")]
    EmptyName,

    /// Several preconditions failed at once
    #[error("{}", join_messages(.0))]
    Joined(Vec<Error>),

    #[error("id not set")]
    IdNotSet,

    #[error("data must not be nil")]
    MissingPayload,

    #[error("failed to serialize request body: {0}")]
    Body(#[source] serde_json::Error),

    #[error("invalid data type: {found}, expected {expected}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to convert {value} to int64")]
    IntConversion { value: String },

    #[error("unknown input {0}")]
    UnknownInput(String),

    #[error("received {0} entries, expected 1")]
    EntryCount(i64),

    #[error("unexpected search result format: {0}")]
    SearchFormat(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl Error {
    /// Combine precondition failures into one error.
    ///
    /// A single failure is returned as-is.
    pub fn join(mut errors: Vec<Error>) -> Error {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Error::Joined(errors)
        }
    }

    /// The transport failure behind this error, if any
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

fn join_messages(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
