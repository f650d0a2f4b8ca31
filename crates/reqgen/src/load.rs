//! API description loading from JSON or YAML text.

use reqgen_core::naming::probe_json;
use reqgen_core::OpenApi;
use serde_json::Value;

use crate::error::Result;

/// Parse an API description.
///
/// Text that looks like a JSON object is probed as JSON first; anything
/// else, including JSON that fails to parse, goes through the YAML parser.
///
/// # Errors
///
/// Returns an error if neither parser accepts the text.
pub fn load_document(text: &str) -> Result<OpenApi> {
    if text.trim_start().starts_with('{') {
        let raw = Value::String(text.to_owned());
        let probed = probe_json(&raw, "document is not valid JSON, retrying as YAML", |message| {
            tracing::debug!("{message}");
        });
        if let Some(value) = probed {
            return Ok(serde_json::from_value(value)?);
        }
    }
    Ok(serde_yaml_ng::from_str(text)?)
}
