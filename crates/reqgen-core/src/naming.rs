//! Identifier synthesis helpers.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde_json::Value;

/// Suffix appended to every generated request function name.
const REQUEST_SUFFIX: &str = "Request";

/// Prefix for functions wrapping non-GET operations.
const CREATE_PREFIX: &str = "create";

/// Upper-case the first character and keep the rest untouched.
///
/// `helloWorld` → `HelloWorld`; the empty string stays empty.
#[must_use]
pub fn to_capital_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name of the request function generated for an operation.
///
/// `PersonController_findPersonById` becomes
/// `personControllerFindPersonByIdRequest` for GET, and
/// `createPersonControllerFindPersonByIdRequest` for every other method.
#[must_use]
pub fn generate_function_name(method: &str, operation_id: &str) -> String {
    if method.eq_ignore_ascii_case("get") {
        format!("{}{REQUEST_SUFFIX}", operation_id.to_lower_camel_case())
    } else {
        format!(
            "{CREATE_PREFIX}{}{REQUEST_SUFFIX}",
            operation_id.to_upper_camel_case()
        )
    }
}

/// Parse `input` as JSON when it is a string holding a JSON document.
///
/// Non-string inputs yield `None` silently. A string that fails to parse
/// yields `None` after passing `error_message` to `report`.
pub fn probe_json(input: &Value, error_message: &str, report: impl FnOnce(&str)) -> Option<Value> {
    let text = input.as_str()?;
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(_) => {
            report(error_message);
            None
        }
    }
}
