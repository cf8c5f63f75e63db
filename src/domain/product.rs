use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::types::{
    CategoryId, ProductDescription, ProductId, ProductName, ProductPrice, ProductRating,
    SalesCount,
};

/// A sellable item together with the category it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub sales_count: SalesCount,
    pub rating: ProductRating,
    pub category: Category,
}

/// Full set of writable product fields.
///
/// Used both for inserts and for full-record updates; there is no partial
/// update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub sales_count: SalesCount,
    pub rating: ProductRating,
    pub category_id: CategoryId,
}

/// Sparse set of conjunctive constraints narrowing a product listing.
///
/// Presence is `Some`, so a zero bound still applies. Text matching on
/// `name_contains` is a case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// `price >= price_min`
    pub price_min: Option<f64>,
    /// `price <= price_max`
    pub price_max: Option<f64>,
    /// `category.id == category_id`. Kept raw: a non-positive id is a valid
    /// constraint that no product satisfies.
    pub category_id: Option<i32>,
    pub name_contains: Option<String>,
    /// `rating >= rating_min`
    pub rating_min: Option<f64>,
}

impl ProductFilter {
    /// Whether `product` satisfies every present constraint.
    pub fn matches(&self, product: &Product) -> bool {
        let price = product.price.get();
        let rating = product.rating.get();
        self.price_min.is_none_or(|min| price >= min)
            && self.price_max.is_none_or(|max| price <= max)
            && self
                .category_id
                .is_none_or(|id| product.category.id == id)
            && self
                .name_contains
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&product.name, needle))
            && self.rating_min.is_none_or(|min| rating >= min)
    }
}

/// Case-insensitive substring test used wherever product names are searched.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.to_lowercase().as_str())
}
