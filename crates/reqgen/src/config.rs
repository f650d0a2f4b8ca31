//! Project-level generator configuration loaded from YAML, JSON or TOML.
//!
//! Keeps the names of the runtime helpers the generated code calls next to
//! the API description instead of hardcoding them.
//!
//! # File format
//!
//! ```yaml
//! # reqgen.yaml
//! file_headers:
//!   - "/* Generated, do not edit. */"
//!   - "import { client, createRequestHook, IResponseError } from './client';"
//!
//! # Wraps GET operations.
//! hook_factory: createRequestHook
//!
//! # Performs every other request.
//! client_request: client.request
//!
//! # Error type parameter of the hook factory.
//! error_type: IResponseError
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default factory wrapping GET operations into hooks.
pub const DEFAULT_HOOK_FACTORY: &str = "createRequestHook";

/// Default request function for non-GET operations.
pub const DEFAULT_CLIENT_REQUEST: &str = "client.request";

/// Default error type passed to the hook factory.
pub const DEFAULT_ERROR_TYPE: &str = "IResponseError";

/// Generator config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Lines emitted verbatim at the top of the output (imports, banners).
    pub file_headers: Vec<String>,

    /// Factory wrapping GET operations, e.g. `createRequestHook`.
    pub hook_factory: String,

    /// Request function for every other method, e.g. `client.request`.
    pub client_request: String,

    /// Error type parameter of the hook factory.
    pub error_type: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            file_headers: Vec::new(),
            hook_factory: DEFAULT_HOOK_FACTORY.to_string(),
            client_request: DEFAULT_CLIENT_REQUEST.to_string(),
            error_type: DEFAULT_ERROR_TYPE.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load config from a file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or its
    /// extension is not `.yaml`, `.yml`, `.json` or `.toml`.
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = match extension.as_deref() {
            Some("yaml" | "yml" | "json" | "toml") => std::fs::read_to_string(path)?,
            _ => {
                return Err(Error::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let config = match extension.as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml_ng::from_str(&content)?,
        };
        tracing::debug!(path = %path.display(), "loaded generator config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_defaults() {
        let config: ProjectConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.hook_factory, "createRequestHook");
        assert_eq!(config.client_request, "client.request");
        assert_eq!(config.error_type, "IResponseError");
        assert!(config.file_headers.is_empty());
    }

    #[test]
    fn deserialize_partial_yaml() {
        let yaml = r#"
file_headers:
  - "import { api } from './api';"
client_request: api.call
"#;
        let config: ProjectConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.file_headers, vec!["import { api } from './api';"]);
        assert_eq!(config.client_request, "api.call");
        // Other fields keep defaults
        assert_eq!(config.hook_factory, "createRequestHook");
    }

    #[test]
    fn load_toml_from_file() {
        let dir = std::env::temp_dir().join("reqgen-config-test-toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("reqgen.toml");
        std::fs::write(&path, "hook_factory = \"useRequest\"\nerror_type = \"ApiError\"\n").unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.hook_factory, "useRequest");
        assert_eq!(config.error_type, "ApiError");
        assert_eq!(config.client_request, "client.request");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_yaml_from_file() {
        let dir = std::env::temp_dir().join("reqgen-config-test-yaml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("reqgen.yml");
        std::fs::write(&path, "error_type: Problem\n").unwrap();

        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.error_type, "Problem");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let result = ProjectConfig::load(Path::new("/nonexistent/reqgen.yaml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn load_unknown_extension_returns_error() {
        let result = ProjectConfig::load(Path::new("reqgen.ini"));
        assert!(matches!(result, Err(Error::UnsupportedConfigFormat { .. })));
    }
}
