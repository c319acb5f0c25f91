//! TOML-backed template catalog
//!
//! A catalog file carries an optional `[metadata]` table and a `[templates]`
//! table mapping keys to template strings:
//!
//! ```toml
//! [metadata]
//! name = "Order notifications"
//!
//! [templates]
//! order = "Order for ||CustomerName||:\n**Lines**"
//! line = "- ||Description||: ||Amount:c2||\n"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::{SourceError, TemplateSource};

/// A template catalog loaded from TOML
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    /// Optional name for the catalog
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Template mappings: key -> template text
    pub templates: HashMap<String, String>,
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    metadata: Option<TomlMetadata>,
    templates: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

impl TemplateCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SourceError> {
        let parsed: TomlCatalog = toml::from_str(content)?;

        Ok(TemplateCatalog {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            templates: parsed.templates,
        })
    }
}

impl TemplateSource for TemplateCatalog {
    fn get_template(&self, key: &str) -> Result<String, SourceError> {
        self.templates
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                key: key.to_string(),
            })
    }
}
