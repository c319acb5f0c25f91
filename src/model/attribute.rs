//! Attribute taxonomy: scalar values, nested models, and model lists

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use super::{TemplateKey, TemplateModel};

/// A named attribute of a model, borrowed for the duration of a render.
#[derive(Debug)]
pub struct Attribute<'a> {
    /// Attribute name as it appears in placeholders.
    pub name: &'a str,
    /// The attribute's value.
    pub value: AttrValue<'a>,
}

/// The value side of an attribute.
///
/// The variant records the attribute's declared shape, independently of
/// whether a value is present. Structural variants carry the declared
/// element type's template key so the engine can resolve it even for an
/// absent value.
pub enum AttrValue<'a> {
    /// A scalar candidate, substituted through `||Name||` placeholders.
    Scalar(Scalar),
    /// A single nested model, expanded through the `**Name**` marker.
    Nested {
        /// Template key declared by the nested model's type.
        key: Option<&'static str>,
        /// The nested value, if present.
        model: Option<&'a dyn TemplateModel>,
    },
    /// An ordered list of child models, expanded through `**Name**`.
    List {
        /// Template key declared by the element type.
        key: Option<&'static str>,
        /// The list elements in iteration order, if the list is present.
        items: Option<Vec<&'a dyn TemplateModel>>,
    },
}

// Model trait objects carry no Debug bound, so structural variants report
// presence and length instead of contents.
impl fmt::Debug for AttrValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            AttrValue::Nested { key, model } => f
                .debug_struct("Nested")
                .field("key", key)
                .field("present", &model.is_some())
                .finish(),
            AttrValue::List { key, items } => f
                .debug_struct("List")
                .field("key", key)
                .field("len", &items.as_ref().map(Vec::len))
                .finish(),
        }
    }
}

/// A typed scalar value with nullability.
///
/// The variant is the declared underlying type; the inner `Option` is the
/// nullable wrapper. An absent value always renders as the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(Option<String>),
    Integer(Option<i64>),
    Float(Option<f64>),
    Boolean(Option<bool>),
    Decimal(Option<Decimal>),
    DateTime(Option<NaiveDateTime>),
}

impl<'a> Attribute<'a> {
    /// Create a scalar attribute.
    pub fn scalar(name: &'a str, value: impl Into<Scalar>) -> Self {
        Self {
            name,
            value: AttrValue::Scalar(value.into()),
        }
    }

    /// Create a nested-model attribute.
    ///
    /// The element type's declared template key is captured from `M` so it
    /// stays resolvable when `value` is `None`.
    pub fn nested<M>(name: &'a str, value: Option<&'a M>) -> Self
    where
        M: TemplateModel + TemplateKey,
    {
        Self {
            name,
            value: AttrValue::Nested {
                key: M::TEMPLATE_KEY,
                model: value.map(|m| m as &dyn TemplateModel),
            },
        }
    }

    /// Create a list-of-models attribute.
    pub fn list<M>(name: &'a str, items: Option<&'a [M]>) -> Self
    where
        M: TemplateModel + TemplateKey,
    {
        Self {
            name,
            value: AttrValue::List {
                key: M::TEMPLATE_KEY,
                items: items.map(|xs| xs.iter().map(|m| m as &dyn TemplateModel).collect()),
            },
        }
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(Some(v.to_string()))
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(Some(v))
    }
}

impl From<Option<String>> for Scalar {
    fn from(v: Option<String>) -> Self {
        Scalar::Text(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(Some(v))
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Integer(Some(v as i64))
    }
}

impl From<Option<i64>> for Scalar {
    fn from(v: Option<i64>) -> Self {
        Scalar::Integer(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(Some(v))
    }
}

impl From<Option<f64>> for Scalar {
    fn from(v: Option<f64>) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(Some(v))
    }
}

impl From<Option<bool>> for Scalar {
    fn from(v: Option<bool>) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<Decimal> for Scalar {
    fn from(v: Decimal) -> Self {
        Scalar::Decimal(Some(v))
    }
}

impl From<Option<Decimal>> for Scalar {
    fn from(v: Option<Decimal>) -> Self {
        Scalar::Decimal(v)
    }
}

impl From<NaiveDateTime> for Scalar {
    fn from(v: NaiveDateTime) -> Self {
        Scalar::DateTime(Some(v))
    }
}

impl From<Option<NaiveDateTime>> for Scalar {
    fn from(v: Option<NaiveDateTime>) -> Self {
        Scalar::DateTime(v)
    }
}

impl From<NaiveDate> for Scalar {
    fn from(v: NaiveDate) -> Self {
        Scalar::DateTime(Some(v.and_hms_opt(0, 0, 0).unwrap_or_default()))
    }
}
