use super::call_info::CallInfo;
use super::diagnostics::{Diagnostics, Outcome};
use super::endpoint;
use super::entity::Id;
use super::error::Error;
use super::transport::Transport;
use reqwest::Method;

/// DELETE `<endpoint>/<id>/`.
///
/// The response body is ignored and the local entity is left as is; the
/// caller discards it.
pub async fn delete(
    transport: Option<&dyn Transport>,
    rci: &CallInfo,
    data: &(dyn Id + Sync),
) -> Outcome {
    let mut diags = Diagnostics::new();
    let Some(transport) = transport else {
        let err = Error::MissingTransport;
        diags.add_error("unable to delete resource", err.to_string());
        return Outcome::failed(diags, err);
    };

    let id = match data.id() {
        Ok(id) => id,
        Err(err) => {
            diags.add_error("unable to get id for resource", err.to_string());
            return Outcome::failed(diags, err);
        }
    };

    let endpoint = endpoint::item(&rci.endpoint, id);
    tracing::debug!(rci = %rci, method = %Method::DELETE, endpoint = %endpoint, "Deleting resource");

    let request = match transport.new_request(Method::DELETE, &endpoint, None) {
        Ok(request) => request,
        Err(err) => {
            diags.add_error(
                format!("Unable to create a new request for {} on {} for delete", rci.name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    if let Err(err) = transport.execute(request).await {
        diags.add_error(
            format!("Unable to delete resource for {} on {}", rci.name, endpoint),
            err.to_string(),
        );
        return Outcome::failed(diags, err.into());
    }

    Outcome::done(diags)
}
