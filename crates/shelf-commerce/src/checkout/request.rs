//! Checkout submission and its validation.
//!
//! The order endpoint receives untrusted JSON. Rather than stopping at the
//! first bad field, validation walks the whole payload and reports every
//! offending field so the client can show them all at once.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::cart::compute_totals;
use crate::checkout::OrderLine;
use crate::ids::{ProductId, UserId};
use crate::money::{Currency, Money};

/// A single invalid field in a submitted payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the field, e.g. `items.1.price`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// All field errors found in a checkout payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid order data ({} field error(s))", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<FieldError> {
        self.0
    }
}

/// A validated checkout submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub user_id: UserId,
    /// Tax-inclusive total as computed by the client.
    pub total: Money,
    pub items: Vec<OrderLine>,
}

impl CheckoutRequest {
    /// Validate a raw JSON payload.
    pub fn from_json(value: &Value) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        let Some(body) = value.as_object() else {
            return Err(ValidationErrors(vec![FieldError::new(
                "",
                "Expected an object",
            )]));
        };

        let user_id = positive_id(body, "userId", "userId", &mut errors).map(UserId::new);
        let total = amount(body, "total", "total", &mut errors);
        let items = match body.get("items") {
            None | Some(Value::Null) => {
                errors.push(FieldError::new("items", "Required"));
                None
            }
            Some(Value::Array(entries)) => Some(
                entries
                    .iter()
                    .enumerate()
                    .filter_map(|(index, entry)| order_line(index, entry, &mut errors))
                    .collect::<Vec<_>>(),
            ),
            Some(_) => {
                errors.push(FieldError::new("items", "Expected an array"));
                None
            }
        };

        match (user_id, total, items) {
            (Some(user_id), Some(total), Some(items)) if errors.is_empty() => Ok(Self {
                user_id,
                total,
                items,
            }),
            _ => Err(ValidationErrors(errors)),
        }
    }

    /// Sum of the submitted line totals, before tax.
    pub fn items_subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(Currency::default()), |acc, line| {
                acc.saturating_add(&line.line_total())
            })
    }

    /// The total the submitted items would produce with tax applied.
    pub fn expected_total(&self) -> Money {
        compute_totals(self.items_subtotal()).total
    }

    /// Whether the submitted total agrees with the submitted items.
    ///
    /// The storefront accepts the client's total as given; this is only
    /// used to flag disagreements.
    pub fn total_matches_items(&self) -> bool {
        self.expected_total().amount_cents == self.total.amount_cents
    }
}

fn order_line(index: usize, entry: &Value, errors: &mut Vec<FieldError>) -> Option<OrderLine> {
    let prefix = format!("items.{index}");
    let Some(fields) = entry.as_object() else {
        errors.push(FieldError::new(prefix, "Expected an object"));
        return None;
    };

    let product_id = positive_id(fields, "productId", &format!("{prefix}.productId"), errors);
    let quantity = positive_id(fields, "quantity", &format!("{prefix}.quantity"), errors)
        .and_then(|q| match u32::try_from(q) {
            Ok(q) => Some(q),
            Err(_) => {
                errors.push(FieldError::new(format!("{prefix}.quantity"), "Quantity too large"));
                None
            }
        });
    let price = amount(fields, "price", &format!("{prefix}.price"), errors);

    Some(OrderLine {
        product_id: ProductId::new(product_id?),
        quantity: quantity?,
        price: price?,
    })
}

fn positive_id(
    body: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<u64> {
    match body.get(key) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(path, "Required"));
            None
        }
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) if v > 0 => Some(v),
            _ => {
                errors.push(FieldError::new(path, "Expected a positive integer"));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new(path, "Expected a number"));
            None
        }
    }
}

fn amount(
    body: &Map<String, Value>,
    key: &str,
    path: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Money> {
    match body.get(key) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(path, "Required"));
            None
        }
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() && v >= 0.0 => {
                Some(Money::from_decimal(v, Currency::default()))
            }
            _ => {
                errors.push(FieldError::new(path, "Expected a non-negative amount"));
                None
            }
        },
        Some(_) => {
            errors.push(FieldError::new(path, "Expected a number"));
            None
        }
    }
}
