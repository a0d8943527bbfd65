//! Shared application state.

use std::sync::Arc;

use shelf_store::{MemStore, Store};

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// State backed by the seeded in-memory catalog.
    pub fn seeded() -> Self {
        Self::new(Arc::new(MemStore::seeded()))
    }
}
