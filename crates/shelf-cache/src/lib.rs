//! Client-side key-value storage for Shelf.
//!
//! Provides a small key-value cache (in memory or one JSON file per key in a
//! directory), typed sessions on top of it, and [`CartSession`], the shopping
//! cart that survives between CLI runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_cache::{Cache, CartSession, SessionId};
//!
//! let cache = Cache::open_dir(data_dir)?;
//! let mut cart = CartSession::open(cache, SessionId::default());
//!
//! cart.add_item(&product, 1)?;
//! println!("Total: {}", cart.totals().total);
//! ```

mod cart;
mod error;
mod kv;
mod session;

pub use cart::CartSession;
pub use error::CacheError;
pub use kv::Cache;
pub use session::{Session, SessionData, SessionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, CartSession, Session, SessionId};
}
