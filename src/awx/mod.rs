//! AWX API interaction module
//!
//! The HTTP side of the lifecycle: an authenticated reqwest client that
//! implements [`Transport`](crate::resource::Transport).
//!
//! # Module Structure
//!
//! - [`auth`] - basic or bearer token authentication
//! - [`client`] - `AwxClient`, the transport implementation
//! - [`http`] - request construction, execution and error formatting
//!
//! # Example
//!
//! ```ignore
//! use towerctl::awx::{auth::Auth, client::AwxClient};
//! use towerctl::resource::Transport;
//!
//! async fn example() -> Result<(), towerctl::resource::Error> {
//!     let client = AwxClient::new("https://awx.example.com", Auth::token("..."), true)?;
//!     let me = client.current_user().await?;
//!     println!("logged in as {}", me.username);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;

pub use auth::Auth;
pub use client::AwxClient;
