//! Textmerge CLI
//!
//! Usage:
//!   textmerge [OPTIONS]
//!
//! Options:
//!   -c, --catalog <FILE>  Template catalog file (TOML format)
//!   -s, --syntax          Show placeholder syntax reference
//!   -h, --help            Print help

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use rust_decimal::Decimal;

use textmerge::{render, Attribute, TemplateCatalog, TemplateKey, TemplateModel};

#[derive(Parser)]
#[command(name = "textmerge")]
#[command(about = "Template-driven text rendering for typed models")]
struct Cli {
    /// Template catalog file (TOML format); the built-in demo catalog is
    /// used if not provided
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Show placeholder syntax reference
    #[arg(short, long)]
    syntax: bool,
}

/// Catalog used when no --catalog file is given
const DEMO_CATALOG: &str = r#"
[metadata]
name = "Demo order confirmation"

[templates]
order = """
Hello ||FirstName|| ||LastName||!

Your order #||OrderId:d6|| placed on ||PlacedAt:MMMM d, yyyy|| is confirmed.

Items:
**Lines**
Ship to:
**Shipping**

Order total: ||Total||
"""
line = "  - ||Description|| x||Quantity|| @ ||UnitPrice:c2||\n"
address = "  ||Street||, ||City|| ||PostalCode||"
"#;

struct Order {
    first_name: String,
    last_name: String,
    order_id: i64,
    placed_at: NaiveDateTime,
    lines: Vec<OrderLine>,
    shipping: Address,
    total: Decimal,
}

impl TemplateKey for Order {
    const TEMPLATE_KEY: Option<&'static str> = Some("order");
}

impl TemplateModel for Order {
    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::scalar("FirstName", self.first_name.as_str()),
            Attribute::scalar("LastName", self.last_name.as_str()),
            Attribute::scalar("OrderId", self.order_id),
            Attribute::scalar("PlacedAt", self.placed_at),
            Attribute::list("Lines", Some(self.lines.as_slice())),
            Attribute::nested("Shipping", Some(&self.shipping)),
            Attribute::scalar("Total", self.total),
        ]
    }
}

struct OrderLine {
    description: String,
    quantity: i64,
    unit_price: Decimal,
}

impl TemplateKey for OrderLine {
    const TEMPLATE_KEY: Option<&'static str> = Some("line");
}

impl TemplateModel for OrderLine {
    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::scalar("Description", self.description.as_str()),
            Attribute::scalar("Quantity", self.quantity),
            Attribute::scalar("UnitPrice", self.unit_price),
        ]
    }
}

struct Address {
    street: String,
    city: String,
    postal_code: String,
}

impl TemplateKey for Address {
    const TEMPLATE_KEY: Option<&'static str> = Some("address");
}

impl TemplateModel for Address {
    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::scalar("Street", self.street.as_str()),
            Attribute::scalar("City", self.city.as_str()),
            Attribute::scalar("PostalCode", self.postal_code.as_str()),
        ]
    }
}

fn sample_order() -> Order {
    Order {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        order_id: 12345,
        placed_at: NaiveDate::from_ymd_opt(2025, 12, 20)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap_or_default(),
        lines: vec![
            OrderLine {
                description: "Mechanical keyboard".to_string(),
                quantity: 1,
                unit_price: Decimal::new(8999, 2),
            },
            OrderLine {
                description: "USB-C cable".to_string(),
                quantity: 2,
                unit_price: Decimal::new(500, 2),
            },
        ],
        shipping: Address {
            street: "221B Baker Street".to_string(),
            city: "London".to_string(),
            postal_code: "NW1 6XE".to_string(),
        },
        total: Decimal::new(9999, 2),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if cli.syntax {
        print_syntax();
        return;
    }

    // Load catalog
    let catalog = match &cli.catalog {
        Some(path) => match TemplateCatalog::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading catalog '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TemplateCatalog::from_str(DEMO_CATALOG)
            .expect("Built-in demo catalog should be valid TOML"),
    };

    let order = sample_order();
    match render(&order, &catalog) {
        Ok(text) => {
            println!("{}", text);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_syntax() {
    println!(
        r#"TEXTMERGE PLACEHOLDER SYNTAX
============================

SCALAR PLACEHOLDERS
-------------------
||Name||            Substitute the attribute's value
||Name:Spec||       Substitute with an explicit format spec
                    (Spec is any run of characters except '|')

An absent value substitutes as the empty string. Placeholder names
with no matching attribute are left untouched.

STRUCTURAL MARKERS
------------------
**Name**            Expand a nested model or a list of models in place
                    using the element type's own template

List elements are concatenated in order with no separator; put any
separator text inside the element template. An absent nested model
or list expands to the empty string.

FORMAT SPECS
------------
Numbers (integer, float, decimal):
    c / c<n>        Currency, grouped: $1,234.50 (default 2 decimals)
    n / n<n>        Grouped number: 1,234,567.00
    f / f<n>        Fixed-point, ungrouped: 1234.50
    d / d<n>        Zero-padded integral (integers only): 000042

Dates and times (pattern tokens; other characters are literal):
    yyyy yy         Year: 2025, 25
    MMMM MMM MM M   Month: December, Dec, 12, 12
    dddd ddd dd d   Weekday or day: Sunday, Sun, 08, 8
    HH H hh h       Hour: 24-hour or 12-hour
    mm m ss s       Minute, second
    tt              AM/PM

Without a spec, decimals render as currency and date/time values use
MM/dd/yyyy hh:mm tt.

CATALOG FILES
-------------
Catalogs are TOML files mapping template keys to template text:

    [metadata]
    name = "Order notifications"

    [templates]
    order = "Order for ||CustomerName||:\n**Lines**"
    line = "- ||Description||: ||Amount:c2||\n"

There is no escaping for literal '||' or '**' sequences in template
text."#
    );
}
