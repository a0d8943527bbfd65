//! REST API for the Shelf storefront.
//!
//! Serves the catalog, reviews and orders held by a [`shelf_store::Store`]
//! as JSON over HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelf_api::{AppState, Server, ServerConfig};
//!
//! let config = ServerConfig::default();
//! Server::bind(&config, AppState::seeded()).await?.run().await?;
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{LogFormat, ServerArgs, ServerConfig};
pub use error::ApiError;
pub use routes::router;
pub use server::{Server, ServerError};
pub use state::AppState;
