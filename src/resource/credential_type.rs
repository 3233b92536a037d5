use super::attr::Attr;
use super::call_info::CallInfo;
use super::diagnostics::{Diagnostics, Outcome};
use super::error::Error;
use super::mapping::set_int64;
use super::search::extract_data_if_search_result;
use super::transport::Transport;
use reqwest::Method;

/// Endpoint listing the credential types known to the API
pub const CREDENTIAL_TYPES_ENDPOINT: &str = "/api/v2/credential_types/";

/// Look up the numeric id of a credential type by its exact name.
pub async fn get_credential_type_id(
    transport: Option<&dyn Transport>,
    rci: &CallInfo,
    name: &str,
) -> Outcome<i64> {
    let mut diags = Diagnostics::new();
    let mut errors = Vec::new();
    if transport.is_none() {
        errors.push(Error::MissingTransport);
    }
    let name = name.trim();
    if name.is_empty() {
        errors.push(Error::EmptyName);
    }
    let Some(transport) = transport.filter(|_| errors.is_empty()) else {
        let err = Error::join(errors);
        diags.add_error("unable to fetch credential type id", err.to_string());
        return Outcome::failed(diags, err);
    };

    let endpoint = format!("{}?name={}", CREDENTIAL_TYPES_ENDPOINT, urlencoding::encode(name));
    tracing::debug!(rci = %rci, endpoint = %endpoint, "Looking up credential type");

    let request = match transport.new_request(Method::GET, &endpoint, None) {
        Ok(request) => request,
        Err(err) => {
            diags.add_error(
                format!("Unable to create a new request for credential type {} on {}", name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    let payload = match transport.execute(request).await {
        Ok(payload) => payload,
        Err(err) => {
            diags.add_error(
                format!("Unable to fetch credential type {} on {}", name, endpoint),
                err.to_string(),
            );
            return Outcome::failed(diags, err.into());
        }
    };

    let (found, entry) = extract_data_if_search_result(payload).into_parts();
    diags.append(found);
    let entry = match entry {
        Ok(entry) => entry,
        Err(err) => return Outcome::failed(diags, err),
    };

    let mut id = Attr::Unknown;
    let outcome = set_int64(&mut id, entry.get("id").unwrap_or(&serde_json::Value::Null));
    diags.append(outcome.diagnostics);
    if let Err(err) = outcome.result {
        return Outcome::failed(diags, err);
    }

    match id.into_option() {
        Some(id) => Outcome::ok(diags, id),
        None => {
            let err = Error::IdNotSet;
            diags.add_error(format!("Credential type {} has no id", name), err.to_string());
            Outcome::failed(diags, err)
        }
    }
}
