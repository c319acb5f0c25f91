//! Model abstraction for renderable documents
//!
//! This module defines how a typed data object exposes itself to the
//! rendering engine: a template key declared per type, and an ordered list
//! of named attributes per instance.
//!
//! # Example
//!
//! ```rust
//! use textmerge::{Attribute, TemplateKey, TemplateModel};
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
//! ```

mod attribute;

pub use attribute::{Attribute, AttrValue, Scalar};

/// Declarative association between a model type and its template key.
///
/// At most one key per type. `None` is the valid "no template declared"
/// state, queried without error; the engine decides whether that state is
/// fatal (it is for the top-level model and for structural members).
///
/// The key is a property of the type, not of an instance, so nested and
/// list-valued attributes can resolve their element's key even when the
/// attribute value is absent.
pub trait TemplateKey {
    /// Template key declared for this type.
    const TEMPLATE_KEY: Option<&'static str>;
}

/// Read-only attribute view over a model instance.
///
/// The engine traverses models exclusively through this trait; it never
/// mutates them. Implementations return attributes in declaration order,
/// which is the order the engine processes them in.
pub trait TemplateModel {
    /// The model's publicly readable attributes, in declaration order.
    fn attributes(&self) -> Vec<Attribute<'_>>;
}
