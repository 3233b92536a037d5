//! towerctl - credential lifecycle for the AWX / Ansible Tower REST API
//!
//! - [`resource`] - the generic create/read/update/delete core
//! - [`credential`] - data-driven credential kinds and the generic entity
//! - [`awx`] - the reqwest based transport
//! - [`config`] - connection settings

pub mod awx;
pub mod config;
pub mod credential;
pub mod models;
pub mod resource;

/// Version injected at compile time via TOWERCTL_VERSION env var (set by CI/CD),
/// or the crate version for local builds.
pub const VERSION: &str = match option_env!("TOWERCTL_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};
