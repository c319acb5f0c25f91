//! The rendering engine: recursive expansion, pattern cache, value formatting
//!
//! The engine walks a model's attributes in declaration order against its
//! template text, substituting scalar placeholders (`||Name||`,
//! `||Name:Spec||`) and expanding structural markers (`**Name**`) by
//! recursing into nested models and model lists. A render stack detects
//! circular template references; compiled scalar matchers are cached
//! process-wide.

mod expand;
pub mod format;
mod pattern;

pub use expand::{expand, ExpandContext};
pub use pattern::scalar_pattern;
