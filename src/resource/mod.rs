//! Resource lifecycle core
//!
//! This module translates typed local entities into API calls and reconciles
//! API responses back into local state. Every entity kind delegates its
//! create, read, update and delete behaviour to the functions here.
//!
//! # Architecture
//!
//! - [`CallInfo`] - endpoint and operation context for one call
//! - [`Transport`] - the HTTP collaborator (request construction + execution)
//! - [`apply_field_mappings`] - merges a payload into typed fields
//! - [`create`], [`read`], [`update`], [`delete`] - one HTTP exchange each
//!
//! Every operation returns an [`Outcome`]: diagnostics for the end user plus a
//! `Result` for programmatic short-circuiting.
//!
//! # Example
//!
//! ```ignore
//! use towerctl::resource::{self, CallInfo, Callee, Source};
//!
//! async fn refresh(client: &AwxClient, state: &mut Credential) {
//!     let rci = CallInfo::new("Network", "/api/v2/credentials/", "net")
//!         .with(Source::Resource, Callee::Read);
//!     let outcome = resource::read(Some(client), &rci, 7, Some(state)).await;
//!     if outcome.has_error() {
//!         eprintln!("{}", outcome.diagnostics);
//!     }
//! }
//! ```

mod attr;
mod call_info;
mod create;
mod credential_type;
mod delete;
mod diagnostics;
pub mod endpoint;
mod entity;
mod error;
mod mapping;
mod read;
mod search;
mod transport;
mod update;

pub use attr::Attr;
pub use call_info::{CallInfo, Callee, Source};
pub use create::create;
pub use credential_type::{get_credential_type_id, CREDENTIAL_TYPES_ENDPOINT};
pub use delete::delete;
pub use diagnostics::{Diagnostic, Diagnostics, Outcome, Severity};
pub use entity::{CreateResource, Id, RequestBody, UpdateResource, Updater};
pub use error::{Error, TransportError};
pub use mapping::{
    apply_field_mappings, json_type_name, set_bool, set_int64, set_string, FieldMapping,
    FieldSetter,
};
pub use read::read;
pub use search::extract_data_if_search_result;
pub use transport::{Payload, Transport};
pub use update::update;
