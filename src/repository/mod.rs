use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, ProductFilter};
use crate::domain::types::{CategoryId, ProductId};

pub mod category;
pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Ordering applied to product listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductOrder {
    /// Ascending by identifier.
    #[default]
    Id,
    /// Descending by sales count, ties broken by ascending identifier.
    BestSelling,
}

/// Query parameters used when listing, searching or filtering products.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductListQuery {
    /// Conjunctive constraints; absent fields impose nothing.
    pub filter: ProductFilter,
    /// Result ordering.
    pub order: ProductOrder,
    /// Maximum number of products to return.
    pub limit: Option<usize>,
}

impl ProductListQuery {
    pub fn filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }
    pub fn name_contains(mut self, name: impl Into<String>) -> Self {
        self.filter.name_contains = Some(name.into());
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.filter.category_id = Some(category_id.get());
        self
    }
    pub fn best_selling(mut self) -> Self {
        self.order = ProductOrder::BestSelling;
        self
    }
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryListQuery {
    /// Case-insensitive substring the category name must contain.
    pub search: Option<String>,
}

impl CategoryListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Build a `LIKE` pattern matching `value` anywhere in a column.
///
/// `%`, `_` and the escape character itself are escaped with `\`, so the
/// pattern must be paired with `ESCAPE '\'`.
pub(crate) fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List products matching the supplied query parameters.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>>;
    /// Retrieve a product, with its category, by identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product and return the stored record.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Overwrite every field of an existing product.
    ///
    /// Fails with [`RepositoryError::NotFound`] when `id` does not exist.
    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<Product>;
    /// Delete a product, returning the number of removed rows.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename an existing category.
    ///
    /// Fails with [`RepositoryError::NotFound`] when `id` does not exist.
    fn update_category(&self, id: CategoryId, category: &NewCategory)
    -> RepositoryResult<Category>;
    /// Delete a category together with every product referencing it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}
