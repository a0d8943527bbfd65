//! Product types.

use std::fmt;
use std::str::FromStr;

use crate::catalog::Rating;
use crate::error::CommerceError;
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Kind of digital good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    /// Downloadable book.
    #[default]
    Ebook,
    /// Design or code template.
    Template,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Ebook => "ebook",
            ProductType::Template => "template",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::Ebook => "E-book",
            ProductType::Template => "Template",
        }
    }
}

impl FromStr for ProductType {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ebook" => Ok(ProductType::Ebook),
            "template" => Ok(ProductType::Template),
            _ => Err(CommerceError::InvalidProductType(s.to_string())),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the catalog.
///
/// `rating` and `review_count` are a cache of the product's reviews and are
/// only changed through [`Product::refresh_rating`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Current catalog price.
    pub price: Money,
    /// Cover image URL.
    pub image_url: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Kind of digital good.
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Mean review rating, 0 when unreviewed.
    pub rating: f64,
    /// Number of reviews.
    pub review_count: u32,
    pub is_bestseller: bool,
    pub is_featured: bool,
}

impl Product {
    /// Check if this is an e-book.
    pub fn is_ebook(&self) -> bool {
        self.product_type == ProductType::Ebook
    }

    /// Check if the product belongs to a category.
    pub fn in_category(&self, category_id: CategoryId) -> bool {
        self.category_id == category_id
    }

    /// Recompute the cached rating from the full set of the product's reviews.
    pub fn refresh_rating<'a>(&mut self, ratings: impl IntoIterator<Item = &'a Rating>) {
        let (sum, count) = ratings
            .into_iter()
            .fold((0u64, 0u32), |(sum, count), r| (sum + u64::from(r.get()), count + 1));
        self.review_count = count;
        self.rating = if count == 0 {
            0.0
        } else {
            sum as f64 / f64::from(count)
        };
    }
}

/// Fields needed to create a product; the store assigns the id and starts
/// the rating at zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: Money,
    pub image_url: String,
    pub category_id: CategoryId,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl NewProduct {
    /// Attach the id assigned by the store.
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            slug: self.slug,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
            category_id: self.category_id,
            product_type: self.product_type,
            rating: 0.0,
            review_count: 0,
            is_bestseller: self.is_bestseller,
            is_featured: self.is_featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        NewProduct {
            name: "Python for Beginners".to_string(),
            slug: "python-for-beginners".to_string(),
            description: "Learn Python".to_string(),
            price: Money::from_cents(9900),
            image_url: "https://example.com/p.jpg".to_string(),
            category_id: CategoryId::new(1),
            product_type: ProductType::Ebook,
            is_bestseller: true,
            is_featured: false,
        }
        .with_id(ProductId::new(2))
    }

    #[test]
    fn test_new_product_starts_unrated() {
        let product = sample();
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.review_count, 0);
        assert!(product.is_ebook());
    }

    #[test]
    fn test_refresh_rating_is_mean() {
        let mut product = sample();
        let ratings = [5, 4, 3].map(|r| Rating::new(r).unwrap());
        product.refresh_rating(&ratings);
        assert_eq!(product.rating, 4.0);
        assert_eq!(product.review_count, 3);
    }

    #[test]
    fn test_refresh_rating_empty() {
        let mut product = sample();
        product.rating = 4.5;
        product.review_count = 120;
        product.refresh_rating(&[] as &[Rating]);
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.review_count, 0);
    }

    #[test]
    fn test_product_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "ebook");
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["isBestseller"], true);
        assert_eq!(json["price"], 99);
    }

    #[test]
    fn test_product_type_parse() {
        assert_eq!("Template".parse::<ProductType>().unwrap(), ProductType::Template);
        assert!("course".parse::<ProductType>().is_err());
    }
}
