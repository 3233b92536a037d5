use super::call_info::CallInfo;
use super::diagnostics::{Diagnostics, Outcome};
use super::endpoint;
use super::entity::CreateResource;
use super::error::Error;
use super::transport::Transport;
use reqwest::Method;

/// POST the entity to the collection endpoint and apply the response to it.
///
/// On success the entity carries the identity assigned by the API.
pub async fn create(
    transport: Option<&dyn Transport>,
    rci: &CallInfo,
    data: Option<&mut dyn CreateResource>,
) -> Outcome {
    let mut diags = Diagnostics::new();
    let mut errors = Vec::new();
    if transport.is_none() {
        errors.push(Error::MissingTransport);
    }
    if data.is_none() {
        errors.push(Error::MissingInput("data"));
    }
    let (Some(transport), Some(data)) = (transport, data) else {
        let err = Error::join(errors);
        diags.add_error("unable to create resource", err.to_string());
        return Outcome::failed(diags, err);
    };

    let endpoint = endpoint::collection(&rci.endpoint);
    let body = match data.request_body() {
        Ok(body) => body,
        Err(err) => {
            diags.add_error(
                format!("Unable to build the request body for {} on {}", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err);
        }
    };

    tracing::debug!(
        rci = %rci,
        method = %Method::POST,
        endpoint = %endpoint,
        "Preparing a request to create a resource"
    );

    let request = match transport.new_request(Method::POST, &endpoint, Some(body)) {
        Ok(request) => request,
        Err(err) => {
            diags.add_error(
                format!("Unable to create a new request for {} on {} for create", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    let payload = match transport.execute(request).await {
        Ok(payload) => payload,
        Err(err) => {
            diags.add_error(
                format!("Unable to create resource for {} on {}", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    tracing::debug!(rci = %rci, fields = payload.len(), "Resource created");

    let outcome = data.update_with_api_data(rci.source, rci.callee, &payload);
    diags.append(outcome.diagnostics);
    Outcome {
        diagnostics: diags,
        result: outcome.result,
    }
}
