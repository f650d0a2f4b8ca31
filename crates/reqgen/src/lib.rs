//! TypeScript request-action generator for OpenAPI documents.
//!
//! Loads an API description (JSON or YAML), resolves it with
//! [`reqgen_core`], and renders one request function per operation plus the
//! shared type declarations they reference.
//!
//! ```ignore
//! let text = std::fs::read_to_string("openapi.yaml")?;
//! let source = reqgen::generate(&text, &reqgen::ProjectConfig::default())?;
//! std::fs::write("requests.ts", source)?;
//! ```

#![allow(clippy::doc_markdown)]
#![forbid(unsafe_code)]

mod config;
pub mod emit;
mod error;
mod load;

pub use config::{ProjectConfig, DEFAULT_CLIENT_REQUEST, DEFAULT_ERROR_TYPE, DEFAULT_HOOK_FACTORY};
pub use emit::{generate, render};
pub use error::{Error, Result};
pub use load::load_document;
