//! Order types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use crate::money::Money;

/// Order status.
///
/// Orders start `Pending` and move to one of the terminal states. Nothing in
/// the storefront advances an order on its own; callers transition explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order fulfilled.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Check whether an order in this state may move to `next`.
    ///
    /// Re-applying the current status is always allowed.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        *self == next || !self.is_terminal()
    }
}

impl FromStr for OrderStatus {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CommerceError::InvalidStatus(s.to_string()))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer user ID.
    pub user_id: UserId,
    /// Tax-inclusive total, as submitted at checkout.
    pub total: Money,
    /// Order status.
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Move the order to a new status, stamping `updated_at`.
    pub fn transition_to(
        &mut self,
        status: OrderStatus,
        now: DateTime<Utc>,
    ) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(status) {
            return Err(CommerceError::InvalidTransition {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }
}

/// Fields needed to create an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub user_id: UserId,
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
}

impl NewOrder {
    /// A pending order for a user.
    pub fn pending(user_id: UserId, total: Money) -> Self {
        Self {
            user_id,
            total,
            status: OrderStatus::Pending,
        }
    }

    /// Attach the id and timestamps assigned by the store.
    pub fn with_id(self, id: OrderId, now: DateTime<Utc>) -> Order {
        Order {
            id,
            user_id: self.user_id,
            total: self.total,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One purchased product within an order.
///
/// `price` is the unit price captured at checkout and never follows later
/// catalog price changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Money,
}

impl OrderItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(i64::from(self.quantity))
    }
}

/// A line submitted at checkout, before it is attached to an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Money,
}

impl OrderLine {
    /// Attach the line to an order.
    pub fn for_order(self, order_id: OrderId) -> NewOrderItem {
        NewOrderItem {
            order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
        }
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_multiply(i64::from(self.quantity))
    }
}

/// Fields needed to create an order item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Money,
}

impl NewOrderItem {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: OrderItemId) -> OrderItem {
        OrderItem {
            id,
            order_id: self.order_id,
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

/// An order together with its items, the shape returned by the order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

impl OrderDetails {
    /// Get total item count.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}
