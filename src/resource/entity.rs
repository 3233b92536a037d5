//! Entity adapter contract
//!
//! Each entity kind exposes these small capabilities to the lifecycle
//! operations. Value copies go through [`Clone`].

use super::call_info::{Callee, Source};
use super::diagnostics::Outcome;
use super::error::Error;
use super::transport::Payload;

/// Persisted identity of an entity
pub trait Id {
    /// Fails when the identity is null or unknown
    fn id(&self) -> Result<i64, Error>;
}

/// JSON request body for create and update
pub trait RequestBody {
    fn request_body(&self) -> Result<Vec<u8>, Error>;
}

/// Refreshes local fields from an API payload
pub trait Updater {
    /// `source` and `callee` describe the running operation so the entity can
    /// pick the matching masking policy.
    fn update_with_api_data(&mut self, source: Source, callee: Callee, data: &Payload) -> Outcome;
}

/// What `create` needs from an entity
pub trait CreateResource: Updater + RequestBody + Send {}

impl<T: Updater + RequestBody + Send> CreateResource for T {}

/// What `update` needs from an entity
pub trait UpdateResource: Updater + RequestBody + Id + Send {}

impl<T: Updater + RequestBody + Id + Send> UpdateResource for T {}
