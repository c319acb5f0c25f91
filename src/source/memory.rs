//! In-memory template source

use std::collections::HashMap;

use super::{SourceError, TemplateSource};

/// A template source backed by an in-memory map
///
/// # Example
///
/// ```rust
/// use textmerge::{MemoryTemplateSource, TemplateSource};
///
/// let source = MemoryTemplateSource::new()
///     .with_template("welcome", "Welcome, ||Name||!");
///
/// assert!(source.get_template("welcome").is_ok());
/// assert!(source.get_template("missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateSource {
    templates: HashMap<String, String>,
}

impl MemoryTemplateSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a key, replacing any previous entry
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Register a template under a key (builder style)
    pub fn with_template(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }
}

impl TemplateSource for MemoryTemplateSource {
    fn get_template(&self, key: &str) -> Result<String, SourceError> {
        self.templates
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_registered_template() {
        let source = MemoryTemplateSource::new().with_template("a", "body");
        assert_eq!(source.get_template("a").expect("Should resolve"), "body");
    }

    #[test]
    fn test_unknown_key_is_not_found() {
        let source = MemoryTemplateSource::new();
        let result = source.get_template("nope");
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut source = MemoryTemplateSource::new();
        source.insert("a", "old");
        source.insert("a", "new");
        assert_eq!(source.get_template("a").expect("Should resolve"), "new");
    }
}
