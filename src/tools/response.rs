// Shared interpretation of DevRev API responses
//
// Every endpoint-backed tool reports through the same four branches, keyed
// only by the tool's label pair and optional detail field:
//
//   non-2xx              -> "<failure> failed with status <code>: <body>"
//   2xx, empty body      -> "<success>: {}"
//   2xx, body not JSON   -> "<success>: Malformed response body: <body>"
//   2xx, valid JSON      -> "<success>: <detail or whole body>"
//
// Remote failures are results, not errors: the caller asked a question and
// "the API said 404" is the answer. Only transport failures (handled a
// layer below) surface as Err.

use crate::http::ApiResponse;
use serde_json::{Map, Value};

/// Render a tool result message for a completed HTTP exchange
///
/// `detail_field` names the sub-object worth embedding on success (for
/// example `work` out of a `works.get` body). When the field is not present
/// the whole decoded body is embedded instead, so callers still see what
/// the API actually returned.
pub fn interpret(
    response: &ApiResponse,
    success_label: &str,
    failure_label: &str,
    detail_field: Option<&str>,
) -> String {
    if !response.is_success() {
        return format!(
            "{} failed with status {}: {}",
            failure_label, response.status, response.text
        );
    }

    let body = if response.text.is_empty() {
        Value::Object(Map::new())
    } else {
        match response.json() {
            Ok(body) => body,
            Err(_) => {
                return format!(
                    "{}: Malformed response body: {}",
                    success_label, response.text
                );
            }
        }
    };

    let detail = detail_field
        .and_then(|field| body.get(field))
        .unwrap_or(&body);
    format!("{}: {}", success_label, detail)
}
