//! Product list filtering and sorting.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Product, ProductType};
use crate::error::CommerceError;

/// 100.00 in cents.
const BAND_LOW: i64 = 10_000;
/// 200.00 in cents.
const BAND_HIGH: i64 = 20_000;

/// Price band of the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    /// Below 100.
    Under100,
    /// 100 to 200, both ends included.
    From100To200,
    /// Above 200.
    Over200,
}

impl PriceBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBand::Under100 => "under100",
            PriceBand::From100To200 => "100to200",
            PriceBand::Over200 => "over200",
        }
    }

    /// Check whether a product's price falls in this band.
    pub fn contains(&self, product: &Product) -> bool {
        let cents = product.price.amount_cents;
        match self {
            PriceBand::Under100 => cents < BAND_LOW,
            PriceBand::From100To200 => (BAND_LOW..=BAND_HIGH).contains(&cents),
            PriceBand::Over200 => cents > BAND_HIGH,
        }
    }
}

impl FromStr for PriceBand {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "under100" => Ok(PriceBand::Under100),
            "100to200" => Ok(PriceBand::From100To200),
            "over200" => Ok(PriceBand::Over200),
            _ => Err(CommerceError::InvalidFilter {
                kind: "price band",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order of the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Highest id first.
    Newest,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Highest rated first.
    Rating,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
            SortOption::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
            SortOption::Rating => "Top Rated",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Newest => b.id.cmp(&a.id),
            SortOption::PriceLow => a.price.amount_cents.cmp(&b.price.amount_cents),
            SortOption::PriceHigh => b.price.amount_cents.cmp(&a.price.amount_cents),
            SortOption::Rating => b.rating.total_cmp(&a.rating),
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "price-low" => Ok(SortOption::PriceLow),
            "price-high" => Ok(SortOption::PriceHigh),
            "rating" => Ok(SortOption::Rating),
            _ => Err(CommerceError::InvalidFilter {
                kind: "sort option",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Narrowing and ordering applied to a fetched product list.
///
/// Unset fields leave the list as it came: no type or price filtering, and
/// the catalog's own order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub product_type: Option<ProductType>,
    pub price: Option<PriceBand>,
    pub sort: Option<SortOption>,
}

impl ProductFilter {
    /// Check whether a product passes the type and price filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.product_type
            .map_or(true, |t| product.product_type == t)
            && self.price.map_or(true, |band| band.contains(product))
    }

    /// Filter then sort. Ties keep their incoming order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        let mut products: Vec<Product> =
            products.into_iter().filter(|p| self.matches(p)).collect();
        if let Some(sort) = self.sort {
            products.sort_by(|a, b| sort.compare(a, b));
        }
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NewProduct;
    use crate::ids::{CategoryId, ProductId};
    use crate::money::Money;

    fn product(id: u64, cents: i64, product_type: ProductType, rating: f64) -> Product {
        let mut product = NewProduct {
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            description: String::new(),
            price: Money::from_cents(cents),
            image_url: String::new(),
            category_id: CategoryId::new(1),
            product_type,
            is_bestseller: false,
            is_featured: false,
        }
        .with_id(ProductId::new(id));
        product.rating = rating;
        product
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, 9999, ProductType::Ebook, 4.5),
            product(2, 10000, ProductType::Template, 4.9),
            product(3, 20000, ProductType::Ebook, 3.0),
            product(4, 20001, ProductType::Template, 4.0),
        ]
    }

    #[test]
    fn test_price_band_bounds() {
        let all = catalog();
        let in_band = |band: PriceBand| -> Vec<u64> {
            all.iter()
                .filter(|p| band.contains(p))
                .map(|p| p.id.get())
                .collect()
        };
        assert_eq!(in_band(PriceBand::Under100), vec![1]);
        assert_eq!(in_band(PriceBand::From100To200), vec![2, 3]);
        assert_eq!(in_band(PriceBand::Over200), vec![4]);
    }

    #[test]
    fn test_filter_by_type_and_price() {
        let filter = ProductFilter {
            product_type: Some(ProductType::Ebook),
            price: Some(PriceBand::From100To200),
            sort: None,
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![3]);
    }

    #[test]
    fn test_default_filter_keeps_order() {
        assert_eq!(ids(&ProductFilter::default().apply(catalog())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_sort_options() {
        let sorted = |sort| {
            let filter = ProductFilter {
                sort: Some(sort),
                ..ProductFilter::default()
            };
            ids(&filter.apply(catalog()))
        };
        assert_eq!(sorted(SortOption::Newest), vec![4, 3, 2, 1]);
        assert_eq!(sorted(SortOption::PriceLow), vec![1, 2, 3, 4]);
        assert_eq!(sorted(SortOption::PriceHigh), vec![4, 3, 2, 1]);
        assert_eq!(sorted(SortOption::Rating), vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_parse_options() {
        assert_eq!("100to200".parse::<PriceBand>().unwrap(), PriceBand::From100To200);
        assert_eq!("price-high".parse::<SortOption>().unwrap(), SortOption::PriceHigh);
        assert!(matches!(
            "cheap".parse::<PriceBand>(),
            Err(CommerceError::InvalidFilter { kind: "price band", .. })
        ));
        assert!("oldest".parse::<SortOption>().is_err());
    }
}
