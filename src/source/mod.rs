//! Template sources: where template text comes from
//!
//! The engine consumes templates through the single-method [`TemplateSource`]
//! contract. A source must fail observably for an unknown key, never
//! silently return an empty string. Two implementations ship with the crate:
//! an in-memory map and a TOML-backed catalog.

mod catalog;
mod memory;

pub use catalog::TemplateCatalog;
pub use memory::MemoryTemplateSource;

use thiserror::Error;

/// Errors that can occur retrieving templates
#[derive(Debug, Error)]
pub enum SourceError {
    /// No template is registered under the requested key
    #[error("no template registered for key: {key}")]
    NotFound { key: String },

    /// Failed to read a catalog file
    #[error("failed to read template catalog: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse catalog TOML
    #[error("failed to parse template catalog TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A provider of template text, looked up by key
pub trait TemplateSource {
    /// Return the template registered under `key`.
    ///
    /// Must return [`SourceError::NotFound`] for an unknown key rather than
    /// an empty string.
    fn get_template(&self, key: &str) -> Result<String, SourceError>;
}
