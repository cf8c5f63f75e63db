use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::forms::categories::{CreateCategoryPayload, UpdateCategoryPayload};
use crate::repository::{CategoryListQuery, CategoryReader, CategoryWriter, RepositoryError};

use super::{Resource, ServiceError, ServiceResult};

/// List every category ordered by name.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories(CategoryListQuery::default()) {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// List categories whose name contains `name`, ignoring case.
pub fn search_categories_by_name<R>(name: &str, repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    match repo.list_categories(CategoryListQuery::default().search(name)) {
        Ok(categories) => Ok(categories),
        Err(e) => {
            log::error!("Failed to search categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Resolve a category by id.
///
/// This is the lookup every product write goes through before touching the
/// store. Non-positive ids cannot exist and are reported as not found.
pub fn find_category<R>(category_id: i32, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    let category_id = match CategoryId::new(category_id) {
        Ok(category_id) => category_id,
        Err(_) => return Err(ServiceError::NotFound(Resource::Category)),
    };

    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => {
            log::debug!("Category {category_id} not found");
            Err(ServiceError::NotFound(Resource::Category))
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_category<R>(payload: CreateCategoryPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    match repo.create_category(&payload.category) {
        Ok(category) => {
            log::info!("Created category {}", category.id);
            Ok(category)
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(payload: UpdateCategoryPayload, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    find_category(payload.category_id.get(), repo)?;

    match repo.update_category(payload.category_id, &payload.category) {
        Ok(category) => {
            log::info!("Updated category {}", category.id);
            Ok(category)
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(Resource::Category)),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a category and, with it, every product that references it.
pub fn delete_category<R>(category_id: i32, repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    let category = find_category(category_id, repo)?;

    match repo.delete_category(category.id) {
        Ok(0) => Err(ServiceError::NotFound(Resource::Category)),
        Ok(_) => {
            log::info!("Deleted category {}", category.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::NewCategory;
    use crate::domain::product::NewProduct;
    use crate::domain::types::{
        CategoryName, ProductDescription, ProductName, ProductPrice, ProductRating, SalesCount,
    };
    use crate::repository::test::TestRepository;
    use crate::repository::{ProductListQuery, ProductReader};

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(name).unwrap(),
        }
    }

    fn sample_product(name: &str, category_id: i32) -> NewProduct {
        NewProduct {
            name: ProductName::new(name).unwrap(),
            description: ProductDescription::new("desc").unwrap(),
            price: ProductPrice::new(1.0).unwrap(),
            sales_count: SalesCount::new(0),
            rating: ProductRating::new(0.0).unwrap(),
            category_id: CategoryId::new(category_id).unwrap(),
        }
    }

    #[test]
    fn lists_categories_by_name() {
        let repo = TestRepository::new(vec![
            sample_category(1, "Toys"),
            sample_category(2, "Books"),
        ]);

        let categories = list_categories(&repo).unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Books", "Toys"]);
    }

    #[test]
    fn searches_categories_ignoring_case() {
        let repo = TestRepository::new(vec![
            sample_category(1, "Toys"),
            sample_category(2, "Books"),
        ]);

        let categories = search_categories_by_name("TOY", &repo).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, 1);
    }

    #[test]
    fn find_category_reports_missing_ids() {
        let repo = TestRepository::new(vec![sample_category(1, "Toys")]);

        assert_eq!(find_category(1, &repo).unwrap().name.as_str(), "Toys");
        assert_eq!(
            find_category(2, &repo).unwrap_err(),
            ServiceError::NotFound(Resource::Category)
        );
        assert_eq!(
            find_category(0, &repo).unwrap_err(),
            ServiceError::NotFound(Resource::Category)
        );
    }

    #[test]
    fn creates_category_with_generated_id() {
        let repo = TestRepository::new(vec![sample_category(1, "Toys")]);
        let payload = CreateCategoryPayload {
            category: NewCategory {
                name: CategoryName::new("Books").unwrap(),
            },
        };

        let category = create_category(payload, &repo).unwrap();
        assert_eq!(category.id, 2);
        assert_eq!(find_category(2, &repo).unwrap(), category);
    }

    #[test]
    fn update_of_missing_category_is_not_found() {
        let repo = TestRepository::new(vec![]);
        let payload = UpdateCategoryPayload {
            category_id: CategoryId::new(9).unwrap(),
            category: NewCategory {
                name: CategoryName::new("Books").unwrap(),
            },
        };

        assert_eq!(
            update_category(payload, &repo).unwrap_err(),
            ServiceError::NotFound(Resource::Category)
        );
        assert!(list_categories(&repo).unwrap().is_empty());
    }

    #[test]
    fn renames_category() {
        let repo = TestRepository::new(vec![sample_category(1, "Toys")]);
        let payload = UpdateCategoryPayload {
            category_id: CategoryId::new(1).unwrap(),
            category: NewCategory {
                name: CategoryName::new("Games").unwrap(),
            },
        };

        let category = update_category(payload, &repo).unwrap();
        assert_eq!(category.name.as_str(), "Games");
    }

    #[test]
    fn delete_category_removes_its_products() {
        let repo = TestRepository::new(vec![
            sample_category(1, "Toys"),
            sample_category(2, "Books"),
        ])
        .with_products(vec![
            sample_product("Robot", 1),
            sample_product("Novel", 2),
        ]);

        delete_category(1, &repo).unwrap();

        let remaining = repo.list_products(ProductListQuery::default()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name.as_str(), "Novel");
        assert_eq!(
            find_category(1, &repo).unwrap_err(),
            ServiceError::NotFound(Resource::Category)
        );
    }

    #[test]
    fn delete_of_missing_category_is_not_found() {
        let repo = TestRepository::new(vec![sample_category(1, "Toys")]);

        assert_eq!(
            delete_category(5, &repo).unwrap_err(),
            ServiceError::NotFound(Resource::Category)
        );
        assert_eq!(list_categories(&repo).unwrap().len(), 1);
    }
}
