use super::call_info::CallInfo;
use super::diagnostics::{Diagnostics, Outcome};
use super::endpoint;
use super::entity::UpdateResource;
use super::error::Error;
use super::transport::Transport;
use reqwest::Method;

/// PATCH the entity at `<endpoint>/<id>` and apply the response to it.
///
/// The entity must already carry its identity; nothing is sent otherwise.
pub async fn update(
    transport: Option<&dyn Transport>,
    rci: &CallInfo,
    data: Option<&mut dyn UpdateResource>,
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
        diags.add_error("unable to update resource", err.to_string());
        return Outcome::failed(diags, err);
    };

    let id = match data.id() {
        Ok(id) => id,
        Err(err) => {
            diags.add_error("unable to get id for resource", err.to_string());
            return Outcome::failed(diags, err);
        }
    };

    // no trailing slash here, unlike read and delete
    let endpoint = endpoint::item_without_slash(&rci.endpoint, id);
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
        method = %Method::PATCH,
        endpoint = %endpoint,
        "Preparing a request to update a resource"
    );

    let request = match transport.new_request(Method::PATCH, &endpoint, Some(body)) {
        Ok(request) => request,
        Err(err) => {
            diags.add_error(
                format!("Unable to create a new request for {} on {} for update", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    let payload = match transport.execute(request).await {
        Ok(payload) => payload,
        Err(err) => {
            diags.add_error(
                format!("Unable to update resource for {} on {}", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    tracing::debug!(rci = %rci, fields = payload.len(), "Resource updated");

    let outcome = data.update_with_api_data(rci.source, rci.callee, &payload);
    diags.append(outcome.diagnostics);
    Outcome {
        diagnostics: diags,
        result: outcome.result,
    }
}
