//! List envelope handling
//!
//! Collection endpoints answer with `{"count": n, "results": [...]}`. Lookups
//! that expect exactly one object unwrap it here.

use super::diagnostics::{Diagnostics, Outcome};
use super::error::Error;
use super::transport::Payload;
use serde_json::Value;

/// Unwrap a single-entry search result.
///
/// Payloads without a `count` key are returned unchanged.
pub fn extract_data_if_search_result(data: Payload) -> Outcome<Payload> {
    let mut diags = Diagnostics::new();
    let Some(count) = data.get("count") else {
        return Outcome::ok(diags, data);
    };

    let count = match count {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(count) = count else {
        let err = Error::SearchFormat(format!("count is not an integer: {}", data["count"]));
        diags.add_error("Failed to convert count number in search result", err.to_string());
        return Outcome::failed(diags, err);
    };

    match count {
        1 => match data.get("results").and_then(Value::as_array).and_then(|r| r.first()) {
            Some(Value::Object(entry)) => Outcome::ok(diags, entry.clone()),
            other => {
                let found = other.map(super::mapping::json_type_name).unwrap_or("nothing");
                let err = Error::SearchFormat(format!("received {} instead of an object", found));
                diags.add_error("Unexpected format for the results array", err.to_string());
                Outcome::failed(diags, err)
            }
        },
        n if n > 1 => {
            let err = Error::EntryCount(n);
            diags.add_error(
                "More than one entry present, please refine your query",
                err.to_string(),
            );
            Outcome::failed(diags, err)
        }
        n => {
            let err = Error::EntryCount(n);
            diags.add_error("No entries found for the data source", err.to_string());
            Outcome::failed(diags, err)
        }
    }
}
