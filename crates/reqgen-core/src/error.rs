//! Typed error enum for the resolution pass.
//!
//! Only structural problems that would make the generated types unsound are
//! errors. Missing schemas degrade to [`TypeDescriptor::Unknown`] instead.
//!
//! [`TypeDescriptor::Unknown`]: crate::TypeDescriptor::Unknown

/// Errors produced while resolving an API description.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A local reference names a component that does not exist.
    #[error("reference '{reference}' does not point at an existing component")]
    DanglingReference {
        /// The reference as written in the document.
        reference: String,
    },

    /// A reference is external, malformed, or points into the wrong
    /// `components` section for the position it appears in.
    #[error("reference '{reference}' is not a local '#/components/{section}/...' reference")]
    UnsupportedReference {
        /// The reference as written in the document.
        reference: String,
        /// The `components` section the reference was expected to target.
        section: &'static str,
    },

    /// A chain of component references loops back onto itself.
    #[error("reference '{reference}' is part of a reference cycle")]
    ReferenceCycle {
        /// The reference at which the cycle was detected.
        reference: String,
    },
}

/// Convenience alias used throughout the crate's public API.
pub type Result<T> = std::result::Result<T, Error>;
