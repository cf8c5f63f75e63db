use crate::domain::product::{Product, ProductFilter};
use crate::domain::types::ProductId;
use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::repository::{
    CategoryReader, ProductListQuery, ProductReader, ProductWriter, RepositoryError,
};

use super::categories::find_category;
use super::{Resource, ServiceError, ServiceResult};

/// Number of products returned by [`best_selling_products`] when no limit
/// is given.
pub const DEFAULT_BEST_SELLERS_LIMIT: usize = 10;

fn query_products<R>(query: ProductListQuery, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    match repo.list_products(query) {
        Ok(products) => Ok(products),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List every product, each with its category, ordered by id.
pub fn list_products<R>(repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    query_products(ProductListQuery::default(), repo)
}

/// Fetch a single product.
///
/// Non-positive ids cannot exist and are reported as not found.
pub fn find_product<R>(product_id: i32, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader,
{
    let product_id = match ProductId::new(product_id) {
        Ok(product_id) => product_id,
        Err(_) => return Err(ServiceError::NotFound(Resource::Product)),
    };

    match repo.get_product_by_id(product_id) {
        Ok(Some(product)) => Ok(product),
        Ok(None) => {
            log::debug!("Product {product_id} not found");
            Err(ServiceError::NotFound(Resource::Product))
        }
        Err(e) => {
            log::error!("Failed to get product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List products whose name contains `name`, ignoring case.
pub fn search_products_by_name<R>(name: &str, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    query_products(ProductListQuery::default().name_contains(name), repo)
}

/// The `limit` products with the highest sales count, best seller first.
pub fn best_selling_products<R>(limit: Option<usize>, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    let limit = limit.unwrap_or(DEFAULT_BEST_SELLERS_LIMIT);
    query_products(ProductListQuery::default().best_selling().limit(limit), repo)
}

/// List products satisfying every constraint present in `filter`.
pub fn filter_products<R>(filter: ProductFilter, repo: &R) -> ServiceResult<Vec<Product>>
where
    R: ProductReader,
{
    query_products(ProductListQuery::default().filter(filter), repo)
}

/// Persist a new product after checking that its category exists.
pub fn create_product<R>(payload: CreateProductPayload, repo: &R) -> ServiceResult<Product>
where
    R: ProductWriter + CategoryReader,
{
    find_category(payload.product.category_id.get(), repo)?;

    match repo.create_product(&payload.product) {
        Ok(product) => {
            log::info!("Created product {}", product.id);
            Ok(product)
        }
        Err(e) => {
            log::error!("Failed to create product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replace every field of an existing product.
///
/// The product must exist and the referenced category must resolve; both
/// checks run before anything is written.
pub fn update_product<R>(payload: UpdateProductPayload, repo: &R) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + CategoryReader,
{
    find_product(payload.product_id.get(), repo)?;
    find_category(payload.product.category_id.get(), repo)?;

    match repo.update_product(payload.product_id, &payload.product) {
        Ok(product) => {
            log::info!("Updated product {}", product.id);
            Ok(product)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(Resource::Product)),
        Err(e) => {
            log::error!("Failed to update product: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Permanently remove a product.
pub fn delete_product<R>(product_id: i32, repo: &R) -> ServiceResult<()>
where
    R: ProductReader + ProductWriter,
{
    let product = find_product(product_id, repo)?;

    match repo.delete_product(product.id) {
        Ok(0) => Err(ServiceError::NotFound(Resource::Product)),
        Ok(_) => {
            log::info!("Deleted product {}", product.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete product: {e}");
            Err(ServiceError::Internal)
        }
    }
}
