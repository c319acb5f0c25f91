//! End-to-end render scenarios for scalar substitution and formatting

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use textmerge::{
    render, Attribute, MemoryTemplateSource, RenderError, TemplateKey, TemplateModel,
};

struct OrderConfirmation {
    first_name: Option<String>,
    last_name: Option<String>,
    order_id: Option<i64>,
    amount: Option<Decimal>,
    ship_date: Option<NaiveDateTime>,
}

impl OrderConfirmation {
    fn sample() -> Self {
        Self {
            first_name: Some("John".to_string()),
            last_name: Some("Doe".to_string()),
            order_id: Some(12345),
            amount: Some(Decimal::new(9999, 2)),
            ship_date: NaiveDate::from_ymd_opt(2025, 12, 28)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
        }
    }

    fn blank() -> Self {
        Self {
            first_name: None,
            last_name: None,
            order_id: None,
            amount: None,
            ship_date: None,
        }
    }
}

impl TemplateKey for OrderConfirmation {
    const TEMPLATE_KEY: Option<&'static str> = Some("confirmation");
}

impl TemplateModel for OrderConfirmation {
    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::scalar("FirstName", self.first_name.clone()),
            Attribute::scalar("LastName", self.last_name.clone()),
            Attribute::scalar("OrderId", self.order_id),
            Attribute::scalar("Amount", self.amount),
            Attribute::scalar("ShipDate", self.ship_date),
        ]
    }
}

fn source_with(template: &str) -> MemoryTemplateSource {
    MemoryTemplateSource::new().with_template("confirmation", template)
}

#[test]
fn test_full_confirmation_message() {
    let source = source_with(
        "Hello ||FirstName|| ||LastName||! Your order #||OrderId|| for ||Amount:c2|| \
         will arrive on ||ShipDate:yyyy-MM-dd||.",
    );

    let text = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(
        text,
        "Hello John Doe! Your order #12345 for $99.99 will arrive on 2025-12-28."
    );
}

#[test]
fn test_null_scalars_render_as_empty() {
    let source = source_with("Value: ||OrderId||, Name: ||FirstName||");
    let text = render(&OrderConfirmation::blank(), &source).expect("Should render");
    assert_eq!(text, "Value: , Name: ");
}

#[test]
fn test_null_never_renders_literally() {
    let source = source_with("[||FirstName||]");
    let text = render(&OrderConfirmation::blank(), &source).expect("Should render");
    assert_eq!(text, "[]");
    assert!(!text.contains("null"));
    assert!(!text.contains("None"));
}

#[test]
fn test_substitution_is_idempotent() {
    let source = source_with("Hello ||FirstName||!");
    let first = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(first, "Hello John!");

    // Render the already-substituted text again: no placeholder syntax
    // remains, so nothing changes.
    let again = MemoryTemplateSource::new().with_template("confirmation", first.as_str());
    let second = render(&OrderConfirmation::sample(), &again).expect("Should render");
    assert_eq!(second, first);
}

#[test]
fn test_unrecognized_placeholders_left_untouched() {
    let source = source_with("||FirstName|| and ||NoSuchAttribute:c2||");
    let text = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(text, "John and ||NoSuchAttribute:c2||");
}

#[test]
fn test_repeated_placeholder_substituted_everywhere() {
    let source = source_with("||FirstName|| ||FirstName|| ||FirstName||");
    let text = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(text, "John John John");
}

#[test]
fn test_decimal_without_spec_renders_as_currency() {
    let source = source_with("due: ||Amount||");
    let text = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(text, "due: $99.99");
}

#[test]
fn test_date_without_spec_uses_default_pattern() {
    let source = source_with("ships ||ShipDate||");
    let text = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(text, "ships 12/28/2025 12:00 AM");
}

#[test]
fn test_invalid_spec_aborts_render() {
    let source = source_with("||Amount:Z9||");
    let result = render(&OrderConfirmation::sample(), &source);
    assert!(matches!(result, Err(RenderError::Format { .. })));
}

#[test]
fn test_malformed_markers_are_not_placeholders() {
    // Single pipes and unbalanced bars are not placeholder syntax.
    let source = source_with("|FirstName| ||FirstName| and pipe: ||");
    let text = render(&OrderConfirmation::sample(), &source).expect("Should render");
    assert_eq!(text, "|FirstName| ||FirstName| and pipe: ||");
}
