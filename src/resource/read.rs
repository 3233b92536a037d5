use super::call_info::CallInfo;
use super::diagnostics::{Diagnostics, Outcome};
use super::endpoint;
use super::entity::Updater;
use super::error::Error;
use super::transport::Transport;
use reqwest::Method;

/// GET `<endpoint>/<id>/` and refresh the updater from the response.
pub async fn read(
    transport: Option<&dyn Transport>,
    rci: &CallInfo,
    id: i64,
    updater: Option<&mut (dyn Updater + Send)>,
) -> Outcome {
    let mut diags = Diagnostics::new();
    let mut errors = Vec::new();
    if transport.is_none() {
        errors.push(Error::MissingTransport);
    }
    if updater.is_none() {
        errors.push(Error::MissingInput("state updater"));
    }
    let (Some(transport), Some(updater)) = (transport, updater) else {
        let err = Error::join(errors);
        diags.add_error("unable to read resource", err.to_string());
        return Outcome::failed(diags, err);
    };

    let endpoint = endpoint::item(&rci.endpoint, id);
    tracing::debug!(rci = %rci, method = %Method::GET, endpoint = %endpoint, "Reading resource");

    let request = match transport.new_request(Method::GET, &endpoint, None) {
        Ok(request) => request,
        Err(err) => {
            diags.add_error(
                format!("Unable to create a new request for {} on {} for read", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    let payload = match transport.execute(request).await {
        Ok(payload) => payload,
        Err(err) => {
            diags.add_error(
                format!("Unable to read resource for {} on {}", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    let outcome = updater.update_with_api_data(rci.source, rci.callee, &payload);
    diags.append(outcome.diagnostics);
    Outcome {
        diagnostics: diags,
        result: outcome.result,
    }
}
