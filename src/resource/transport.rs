//! Transport contract consumed by the lifecycle operations

use super::error::{Error, TransportError};
use crate::models::User;
use async_trait::async_trait;
use reqwest::{Method, Request};
use serde_json::{Map, Value};

/// Decoded JSON object returned by the API
pub type Payload = Map<String, Value>;

/// HTTP execution collaborator.
///
/// Implementations must be safe to reuse across sequential calls; the
/// lifecycle operations never issue concurrent requests through it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Build a request for `endpoint` (a path relative to the API host)
    fn new_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, TransportError>;

    /// Send a request and decode the response body.
    ///
    /// An empty body decodes to an empty payload.
    async fn execute(&self, request: Request) -> Result<Payload, TransportError>;

    /// The user the transport is authenticated as
    async fn current_user(&self) -> Result<User, Error>;
}
