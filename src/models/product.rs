use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{
    ProductDescription, ProductName, ProductPrice, ProductRating, SalesCount,
    TypeConstraintError,
};
use crate::models::category::Category;

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sales_count: i32,
    pub rating: f64,
    pub category_id: i32,
}

/// Insertable/changeset form of [`Product`].
///
/// Every column is written on update, which gives full-record replacement.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sales_count: i32,
    pub rating: f64,
    pub category_id: i32,
}

impl TryFrom<(Product, Category)> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from((product, category): (Product, Category)) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            description: ProductDescription::new(product.description)?,
            price: ProductPrice::new(product.price)?,
            sales_count: SalesCount::new(product.sales_count),
            rating: ProductRating::new(product.rating)?,
            category: category.try_into()?,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            name: product.name.into_inner(),
            description: product.description.into_inner(),
            price: product.price.get(),
            sales_count: product.sales_count.get(),
            rating: product.rating.get(),
            category_id: product.category_id.get(),
        }
    }
}

impl From<&DomainNewProduct> for NewProduct {
    fn from(product: &DomainNewProduct) -> Self {
        product.clone().into()
    }
}
