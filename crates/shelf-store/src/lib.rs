//! Order store for the Shelf storefront.
//!
//! Provides the [`Store`] repository trait used by the REST API and
//! [`MemStore`], an in-memory implementation guarded by a single lock.
//!
//! # Example
//!
//! ```rust
//! use shelf_commerce::prelude::*;
//! use shelf_store::{MemStore, Store};
//!
//! let store = MemStore::seeded();
//! let details = store
//!     .place_order(
//!         NewOrder::pending(DEMO_USER_ID, Money::from_cents(11385)),
//!         vec![OrderLine {
//!             product_id: ProductId::new(2),
//!             quantity: 1,
//!             price: Money::from_cents(9900),
//!         }],
//!     )
//!     .unwrap();
//!
//! assert_eq!(details.order.status, OrderStatus::Pending);
//! assert_eq!(details.items.len(), 1);
//! ```

mod error;
mod memory;
mod seed;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemStore;
pub use store::Store;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{MemStore, Store, StoreError, StoreResult};
}
