//! Product catalog module.
//!
//! Contains types for categories, products and reviews, plus the filters
//! applied to product lists.

mod category;
mod filter;
mod product;
mod review;

pub use category::{Category, NewCategory};
pub use filter::{PriceBand, ProductFilter, SortOption};
pub use product::{NewProduct, Product, ProductType};
pub use review::{NewReview, Rating, Review, ReviewSubmission};
