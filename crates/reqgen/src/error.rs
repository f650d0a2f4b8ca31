//! Typed error enum for the `reqgen` library API.
//!
//! The CLI (`main.rs`) converts these to `anyhow::Error` at the binary
//! boundary for richer context messages.

use std::path::PathBuf;

/// Errors produced by `reqgen` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading config or document files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing or serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML config parsing failure.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// The API description could not be resolved.
    #[error("failed to resolve API description: {0}")]
    Resolve(#[from] reqgen_core::Error),

    /// A config file whose extension is not `.yaml`, `.yml`, `.json` or `.toml`.
    #[error("unsupported config format: {}", .path.display())]
    UnsupportedConfigFormat {
        /// The rejected config path.
        path: PathBuf,
    },
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
