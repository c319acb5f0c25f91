//! Textmerge - Template-driven text rendering for typed models
//!
//! This library renders text documents (email bodies, notifications, reports)
//! from typed data objects and externally supplied template strings. A model
//! type declares a template key; placeholders in the template are substituted
//! with the model's attribute values, with optional per-placeholder formatting
//! and recursive expansion of nested models and model lists.
//!
//! # Example
//!
//! ```rust
//! use textmerge::{render, Attribute, MemoryTemplateSource, TemplateKey, TemplateModel};
//!
//! struct Greeting {
//!     name: String,
//! }
//!
//! impl TemplateKey for Greeting {
//!     const TEMPLATE_KEY: Option<&'static str> = Some("greeting");
//! }
//!
//! impl TemplateModel for Greeting {
//!     fn attributes(&self) -> Vec<Attribute<'_>> {
//!         vec![Attribute::scalar("Name", self.name.as_str())]
//!     }
//! }
//!
//! let source = MemoryTemplateSource::new().with_template("greeting", "Hello ||Name||!");
//! let text = render(&Greeting { name: "Ada".to_string() }, &source).unwrap();
//! assert_eq!(text, "Hello Ada!");
//! ```

pub mod engine;
pub mod model;
pub mod source;

pub use engine::format::FormatError;
pub use engine::ExpandContext;
pub use model::{AttrValue, Attribute, Scalar, TemplateKey, TemplateModel};
pub use source::{MemoryTemplateSource, SourceError, TemplateCatalog, TemplateSource};

use log::debug;
use thiserror::Error;

/// Errors that can occur during the render pipeline
///
/// Every variant is fatal to the enclosing render call; there is no partial
/// or best-effort output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The top-level model's type declares no template key
    #[error("model type {0} declares no template key")]
    MissingTemplateKey(&'static str),

    /// The template source failed to produce a template
    #[error("template source error: {0}")]
    Source(#[from] SourceError),

    /// The source returned an empty template for the resolved key
    #[error("template for key '{key}' is empty")]
    EmptyTemplate { key: String },

    /// A structural marker names an attribute whose type has no template key
    #[error("attribute {attribute} has no associated template")]
    MemberWithoutTemplate { attribute: String },

    /// A template key was reached again while it was still being expanded
    #[error("circular template reference detected: {chain}")]
    CircularReference { chain: String },

    /// An explicit format spec is incompatible with the attribute's value type
    #[error("cannot format attribute {attribute}: {source}")]
    Format {
        attribute: String,
        #[source]
        source: FormatError,
    },
}

/// Render a model against a template source
///
/// This is the main entry point for the library. It resolves the model
/// type's declared template key, fetches the template text, and recursively
/// substitutes placeholders.
///
/// The engine never mutates the model and holds no state across calls apart
/// from the process-wide compiled-pattern cache, so concurrent renders from
/// independent threads need no caller-side synchronization.
///
/// # Example
///
/// ```rust
/// use textmerge::{render, Attribute, MemoryTemplateSource, TemplateKey, TemplateModel};
///
/// struct Reminder {
///     subject: String,
/// }
///
/// impl TemplateKey for Reminder {
///     const TEMPLATE_KEY: Option<&'static str> = Some("reminder");
/// }
///
/// impl TemplateModel for Reminder {
///     fn attributes(&self) -> Vec<Attribute<'_>> {
///         vec![Attribute::scalar("Subject", self.subject.as_str())]
///     }
/// }
///
/// let source = MemoryTemplateSource::new()
///     .with_template("reminder", "Reminder: ||Subject||");
///
/// let text = render(&Reminder { subject: "standup".to_string() }, &source).unwrap();
/// assert_eq!(text, "Reminder: standup");
/// ```
pub fn render<M>(model: &M, source: &dyn TemplateSource) -> Result<String, RenderError>
where
    M: TemplateModel + TemplateKey,
{
    let key = M::TEMPLATE_KEY
        .ok_or_else(|| RenderError::MissingTemplateKey(std::any::type_name::<M>()))?;

    let template = source.get_template(key)?;
    if template.is_empty() {
        return Err(RenderError::EmptyTemplate {
            key: key.to_string(),
        });
    }

    debug!("rendering template '{}' ({} bytes)", key, template.len());

    let mut ctx = ExpandContext::new();
    engine::expand(model, &template, source, &mut ctx, key)
}
