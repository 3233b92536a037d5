//! HTTP utilities for AWX REST API calls

use super::auth::Auth;
use crate::resource::{Error, Payload, TransportError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Join the API host and a relative endpoint
pub fn join_url(hostname: &str, endpoint: &str) -> Result<Url, TransportError> {
    let raw = format!(
        "{}/{}",
        hostname.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    );
    Url::parse(&raw).map_err(|source| TransportError::InvalidUrl { url: raw, source })
}

/// HTTP client wrapper for AWX API calls
#[derive(Clone)]
pub struct AwxHttpClient {
    client: Client,
    hostname: String,
    auth: Auth,
}

impl AwxHttpClient {
    pub fn new(hostname: &str, auth: Auth, verify_ssl: bool) -> Result<Self, TransportError> {
        // fail early on a malformed host
        join_url(hostname, "/")?;

        if !verify_ssl {
            tracing::warn!("TLS certificate verification is disabled for {}", hostname);
        }

        let client = Client::builder()
            .user_agent(format!("towerctl/{}", crate::VERSION))
            .danger_accept_invalid_certs(!verify_ssl)
            .build()?;

        Ok(Self {
            client,
            hostname: hostname.to_string(),
            auth,
        })
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Build an authenticated JSON request for `endpoint`
    pub fn build_request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, TransportError> {
        let url = join_url(&self.hostname, endpoint)?;

        let mut builder = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");
        builder = self.auth.apply(builder);

        if let Some(body) = body {
            builder = builder.body(body);
        }

        Ok(builder.build()?)
    }

    /// Send a request and decode the JSON object it returns
    pub async fn send(&self, request: Request) -> Result<Payload, TransportError> {
        let method = request.method().clone();
        let uri = request.url().to_string();
        tracing::debug!("{} {}", method, uri);

        let response = self.client.execute(request).await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(TransportError::InvalidStatusCode {
                status: status.as_u16(),
                uri,
                body,
            });
        }

        // DELETE answers 204 with no content
        if body.trim().is_empty() {
            return Ok(Payload::new());
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Format an API error for display
/// Security: generic messages for well known statuses instead of raw API bodies
pub fn format_api_error(error: &Error) -> String {
    let status = error.transport().and_then(TransportError::status);

    match status {
        Some(401) => "Authentication failed. Check your username/password or token.".to_string(),
        Some(403) => "Permission denied. Check the user's roles in AWX.".to_string(),
        Some(404) => "Resource not found.".to_string(),
        Some(400) => "Invalid request. Check your parameters.".to_string(),
        Some(409) => "Resource conflict. The resource may already exist or be in use.".to_string(),
        Some(429) => "Rate limit exceeded. Please try again later.".to_string(),
        Some(500 | 502 | 503) => "AWX service temporarily unavailable. Please try again.".to_string(),
        _ => {
            let error_str = error.to_string();
            let sanitized = error_str
                .chars()
                .filter(|c| !c.is_control() || *c == '\n')
                .take(160)
                .collect::<String>();

            if sanitized.len() < error_str.len() {
                format!("{}...", sanitized)
            } else {
                sanitized
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        let url = join_url("https://awx.example.com/", "/api/v2/credentials/").unwrap();
        assert_eq!(url.as_str(), "https://awx.example.com/api/v2/credentials/");

        let url = join_url("https://awx.example.com", "api/v2/credential_types/?name=Network").unwrap();
        assert_eq!(url.path(), "/api/v2/credential_types/");
        assert_eq!(url.query(), Some("name=Network"));
    }

    #[test]
    fn test_join_url_rejects_missing_scheme() {
        let err = join_url("awx.example.com", "/api/v2/").unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
        assert_eq!(sanitize_for_log("line\nbreak"), "linebreak");
    }

    #[test]
    fn test_build_request_sets_headers_and_body() {
        let client = AwxHttpClient::new("https://awx.example.com", Auth::token("t"), true).unwrap();
        let request = client
            .build_request(Method::POST, "/api/v2/credentials/", Some(b"{}".to_vec()))
            .unwrap();

        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.url().as_str(), "https://awx.example.com/api/v2/credentials/");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"{}"[..]));
    }

    #[test]
    fn test_format_api_error() {
        let err = Error::from(TransportError::InvalidStatusCode {
            status: 403,
            uri: "https://awx.example.com/api/v2/credentials/".to_string(),
            body: "{\"detail\":\"nope\"}".to_string(),
        });
        assert!(format_api_error(&err).starts_with("Permission denied"));
        assert_eq!(format_api_error(&Error::IdNotSet), "id not set");
    }
}
