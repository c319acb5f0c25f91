//! Recursive placeholder expansion with cycle detection

use std::collections::HashSet;

use log::{debug, trace};

use crate::engine::format::format_scalar;
use crate::engine::pattern::scalar_pattern;
use crate::model::{AttrValue, Scalar, TemplateModel};
use crate::source::TemplateSource;
use crate::RenderError;

/// Per-render expansion state
///
/// Owns the render stack: the set of template keys currently being expanded
/// on this call path, used to detect circular template references. A context
/// belongs to exactly one top-level render call and is never shared, so no
/// locking is involved.
#[derive(Debug, Default)]
pub struct ExpandContext {
    /// Keys currently being expanded, for O(1) cycle checks
    expanding: HashSet<String>,
    /// The same keys in push order, for the error message
    chain: Vec<String>,
}

impl ExpandContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a key is currently being expanded (cycle detection)
    pub fn is_expanding(&self, key: &str) -> bool {
        self.expanding.contains(key)
    }

    /// Mark a key as being expanded
    fn start_expanding(&mut self, key: &str) {
        self.expanding.insert(key.to_string());
        self.chain.push(key.to_string());
    }

    /// Mark a key as done expanding
    fn done_expanding(&mut self, key: &str) {
        self.expanding.remove(key);
        self.chain.pop();
    }

    /// The expansion path that led back to `key`, e.g. `"a -> b -> a"`
    fn chain_to(&self, key: &str) -> String {
        let mut chain = self.chain.join(" -> ");
        chain.push_str(" -> ");
        chain.push_str(key);
        chain
    }
}

/// Expand a template against a model, recursing into nested models and
/// model lists.
///
/// The key is pushed onto the render stack for the duration of the call and
/// popped on every exit path, success or failure, so sibling subtrees and
/// later renders are unaffected by a failed expansion.
pub fn expand(
    model: &dyn TemplateModel,
    template: &str,
    source: &dyn TemplateSource,
    ctx: &mut ExpandContext,
    key: &str,
) -> Result<String, RenderError> {
    if ctx.is_expanding(key) {
        return Err(RenderError::CircularReference {
            chain: ctx.chain_to(key),
        });
    }

    ctx.start_expanding(key);
    let result = expand_attributes(model, template, source, ctx);
    ctx.done_expanding(key);
    result
}

fn expand_attributes(
    model: &dyn TemplateModel,
    template: &str,
    source: &dyn TemplateSource,
    ctx: &mut ExpandContext,
) -> Result<String, RenderError> {
    let mut output = template.to_string();

    for attr in model.attributes() {
        let marker = format!("**{}**", attr.name);
        match &attr.value {
            AttrValue::List { key, items } => {
                if !output.contains(&marker) {
                    continue;
                }
                let expanded = expand_list(attr.name, *key, items.as_deref(), source, ctx)?;
                output = output.replace(&marker, &expanded);
            }
            AttrValue::Nested { key, model } => {
                if !output.contains(&marker) {
                    continue;
                }
                let expanded = expand_nested(attr.name, *key, *model, source, ctx)?;
                output = output.replace(&marker, &expanded);
            }
            AttrValue::Scalar(scalar) => {
                // A structural marker demands a template-keyed type; a
                // scalar attribute can never satisfy it.
                if output.contains(&marker) {
                    return Err(RenderError::MemberWithoutTemplate {
                        attribute: attr.name.to_string(),
                    });
                }
                output = substitute_scalar(&output, attr.name, scalar)?;
            }
        }
    }

    Ok(output)
}

fn expand_list(
    name: &str,
    key: Option<&'static str>,
    items: Option<&[&dyn TemplateModel]>,
    source: &dyn TemplateSource,
    ctx: &mut ExpandContext,
) -> Result<String, RenderError> {
    let key = key.ok_or_else(|| RenderError::MemberWithoutTemplate {
        attribute: name.to_string(),
    })?;

    let items = match items {
        Some(items) => items,
        None => return Ok(String::new()),
    };

    debug!("expanding list attribute '{}' ({} items)", name, items.len());
    let template = source.get_template(key)?;
    let mut expanded = String::new();
    for item in items {
        expanded.push_str(&expand(*item, &template, source, ctx, key)?);
    }
    Ok(expanded)
}

fn expand_nested(
    name: &str,
    key: Option<&'static str>,
    model: Option<&dyn TemplateModel>,
    source: &dyn TemplateSource,
    ctx: &mut ExpandContext,
) -> Result<String, RenderError> {
    let key = key.ok_or_else(|| RenderError::MemberWithoutTemplate {
        attribute: name.to_string(),
    })?;

    let model = match model {
        Some(model) => model,
        None => return Ok(String::new()),
    };

    debug!("expanding nested attribute '{}' with template '{}'", name, key);
    let template = source.get_template(key)?;
    expand(model, &template, source, ctx, key)
}

/// Replace every `||Name||` / `||Name:Spec||` occurrence with the formatted
/// value, formatting each occurrence with its own spec.
fn substitute_scalar(template: &str, name: &str, value: &Scalar) -> Result<String, RenderError> {
    let pattern = scalar_pattern(name);
    if !pattern.is_match(template) {
        return Ok(template.to_string());
    }

    trace!("substituting scalar attribute '{}'", name);
    let mut output = String::with_capacity(template.len());
    let mut last = 0;
    for caps in pattern.captures_iter(template) {
        let placeholder = caps.get(0).expect("capture 0 is the whole match");
        let spec = caps.get(1).map(|m| m.as_str());
        let formatted =
            format_scalar(value, spec).map_err(|source| RenderError::Format {
                attribute: name.to_string(),
                source,
            })?;
        output.push_str(&template[last..placeholder.start()]);
        output.push_str(&formatted);
        last = placeholder.end();
    }
    output.push_str(&template[last..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attribute, TemplateKey};
    use crate::source::MemoryTemplateSource;

    struct Line {
        description: String,
    }

    impl TemplateKey for Line {
        const TEMPLATE_KEY: Option<&'static str> = Some("line");
    }

    impl TemplateModel for Line {
        fn attributes(&self) -> Vec<Attribute<'_>> {
            vec![Attribute::scalar("Description", self.description.as_str())]
        }
    }

    struct Note {
        body: Option<String>,
        lines: Option<Vec<Line>>,
    }

    impl TemplateKey for Note {
        const TEMPLATE_KEY: Option<&'static str> = Some("note");
    }

    impl TemplateModel for Note {
        fn attributes(&self) -> Vec<Attribute<'_>> {
            vec![
                Attribute::scalar("Body", self.body.clone()),
                Attribute::list("Lines", self.lines.as_deref()),
            ]
        }
    }

    fn sources() -> MemoryTemplateSource {
        MemoryTemplateSource::new()
            .with_template("note", "||Body||\n**Lines**")
            .with_template("line", "- ||Description||\n")
    }

    #[test]
    fn test_expand_scalar_and_list() {
        let note = Note {
            body: Some("todo".to_string()),
            lines: Some(vec![
                Line {
                    description: "first".to_string(),
                },
                Line {
                    description: "second".to_string(),
                },
            ]),
        };
        let source = sources();
        let mut ctx = ExpandContext::new();
        let text = expand(&note, "||Body||\n**Lines**", &source, &mut ctx, "note")
            .expect("Should expand");
        assert_eq!(text, "todo\n- first\n- second\n");
    }

    #[test]
    fn test_absent_list_expands_to_empty() {
        let note = Note {
            body: None,
            lines: None,
        };
        let source = sources();
        let mut ctx = ExpandContext::new();
        let text = expand(&note, "||Body||[**Lines**]", &source, &mut ctx, "note")
            .expect("Should expand");
        assert_eq!(text, "[]");
    }

    #[test]
    fn test_stack_is_empty_after_failed_expansion() {
        struct Cyclic;

        impl TemplateKey for Cyclic {
            const TEMPLATE_KEY: Option<&'static str> = Some("cyclic");
        }

        impl TemplateModel for Cyclic {
            fn attributes(&self) -> Vec<Attribute<'_>> {
                vec![Attribute::nested("Inner", Some(&Cyclic))]
            }
        }

        let source = MemoryTemplateSource::new().with_template("cyclic", "**Inner**");
        let mut ctx = ExpandContext::new();
        let result = expand(&Cyclic, "**Inner**", &source, &mut ctx, "cyclic");
        assert!(matches!(result, Err(RenderError::CircularReference { .. })));
        assert!(!ctx.is_expanding("cyclic"));
    }

    #[test]
    fn test_each_occurrence_uses_its_own_spec() {
        struct Amounts {
            total: f64,
        }

        impl TemplateKey for Amounts {
            const TEMPLATE_KEY: Option<&'static str> = Some("amounts");
        }

        impl TemplateModel for Amounts {
            fn attributes(&self) -> Vec<Attribute<'_>> {
                vec![Attribute::scalar("Total", self.total)]
            }
        }

        let source = MemoryTemplateSource::new();
        let mut ctx = ExpandContext::new();
        let text = expand(
            &Amounts { total: 1234.5 },
            "||Total:c2|| (||Total:f0||)",
            &source,
            &mut ctx,
            "amounts",
        )
        .expect("Should expand");
        assert_eq!(text, "$1,234.50 (1235)");
    }

    #[test]
    fn test_scalar_named_by_structural_marker_fails() {
        let note = Note {
            body: Some("x".to_string()),
            lines: None,
        };
        let source = sources();
        let mut ctx = ExpandContext::new();
        let result = expand(&note, "**Body**", &source, &mut ctx, "note");
        assert!(matches!(
            result,
            Err(RenderError::MemberWithoutTemplate { .. })
        ));
    }
}
