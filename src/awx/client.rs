//! AWX Client
//!
//! The concrete [`Transport`] used by the CLI: an authenticated HTTP client
//! bound to one AWX / Tower host.

use super::auth::Auth;
use super::http::AwxHttpClient;
use crate::models::User;
use crate::resource::{
    extract_data_if_search_result, Error, Payload, Transport, TransportError,
};
use async_trait::async_trait;
use reqwest::{Method, Request};
use serde_json::Value;

/// Endpoint describing the authenticated user
pub const ME_ENDPOINT: &str = "/api/v2/me/";

/// Main AWX client
#[derive(Clone)]
pub struct AwxClient {
    pub http: AwxHttpClient,
}

impl AwxClient {
    pub fn new(hostname: &str, auth: Auth, verify_ssl: bool) -> Result<Self, TransportError> {
        tracing::info!("Connecting to {} using {} auth", hostname, auth.method());
        let http = AwxHttpClient::new(hostname, auth, verify_ssl)?;
        Ok(Self { http })
    }

    pub fn hostname(&self) -> &str {
        self.http.hostname()
    }
}

#[async_trait]
impl Transport for AwxClient {
    fn new_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, TransportError> {
        self.http.build_request(method, endpoint, body)
    }

    async fn execute(&self, request: Request) -> Result<Payload, TransportError> {
        self.http.send(request).await
    }

    async fn current_user(&self) -> Result<User, Error> {
        let request = self.new_request(Method::GET, ME_ENDPOINT, None)?;
        let payload = self.execute(request).await?;

        // /me/ answers with a list envelope holding exactly one user
        let (_, entry) = extract_data_if_search_result(payload).into_parts();
        let user = serde_json::from_value::<User>(Value::Object(entry?))
            .map_err(TransportError::from)?;

        tracing::debug!("Authenticated as {} (id {})", user.username, user.id);
        Ok(user)
    }
}
