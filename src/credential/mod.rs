//! Credential entities
//!
//! Every credential kind shares one entity type, [`Credential`], whose inputs
//! are declared by a [`CredentialKind`] loaded from the embedded registry.
//! [`CredentialResource`] wires a kind to the lifecycle operations.

mod kind;
mod model;
mod resource;

pub use kind::{all_kinds, get_kind, get_registry, CredentialKind, InputField, InputType};
pub use model::{Credential, InputValue, REDACTED};
pub use resource::CredentialResource;
