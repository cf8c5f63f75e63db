use std::cell::RefCell;

use crate::domain::category::{Category, NewCategory};
use crate::domain::product::{NewProduct, Product, contains_ignore_case};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, ProductListQuery, ProductOrder,
    ProductReader, ProductWriter, RepositoryError, RepositoryResult,
};

/// Simple in-memory repository used for unit tests.
///
/// Products are stored unjoined and resolved against the category list on
/// every read, mirroring the left join done by the Diesel repository.
#[derive(Default)]
pub struct TestRepository {
    categories: RefCell<Vec<Category>>,
    products: RefCell<Vec<(ProductId, NewProduct)>>,
    next_id: RefCell<i32>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        let next_id = categories.iter().map(|c| c.id.get()).max().unwrap_or(0);
        Self {
            categories: RefCell::new(categories),
            products: RefCell::new(vec![]),
            next_id: RefCell::new(next_id),
        }
    }

    pub fn with_products(self, products: Vec<NewProduct>) -> Self {
        for product in products {
            self.create_product(&product)
                .expect("seeded product must reference a seeded category");
        }
        self
    }

    pub fn product_count(&self) -> usize {
        self.products.borrow().len()
    }

    fn allocate_id(&self) -> i32 {
        let mut next_id = self.next_id.borrow_mut();
        *next_id += 1;
        *next_id
    }

    fn resolve(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<Product> {
        let category = self
            .categories
            .borrow()
            .iter()
            .find(|c| c.id == product.category_id)
            .cloned()
            .ok_or_else(|| RepositoryError::ValidationError("missing category".into()))?;

        Ok(Product {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            sales_count: product.sales_count,
            rating: product.rating,
            category,
        })
    }

    fn ensure_category(&self, id: CategoryId) -> RepositoryResult<()> {
        if self.categories.borrow().iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(RepositoryError::ValidationError(
                "FOREIGN KEY constraint failed".into(),
            ))
        }
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        let mut items = self
            .products
            .borrow()
            .iter()
            .map(|(id, product)| self.resolve(*id, product))
            .collect::<RepositoryResult<Vec<Product>>>()?;

        items.retain(|p| query.filter.matches(p));

        match query.order {
            ProductOrder::Id => items.sort_by_key(|p| p.id),
            ProductOrder::BestSelling => {
                items.sort_by(|a, b| b.sales_count.cmp(&a.sales_count).then(a.id.cmp(&b.id)))
            }
        }

        if let Some(limit) = query.limit {
            items.truncate(limit);
        }

        Ok(items)
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        self.products
            .borrow()
            .iter()
            .find(|(product_id, _)| *product_id == id)
            .map(|(product_id, product)| self.resolve(*product_id, product))
            .transpose()
    }
}

impl ProductWriter for TestRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        self.ensure_category(product.category_id)?;
        let id = ProductId::new(self.allocate_id())?;
        self.products.borrow_mut().push((id, product.clone()));
        self.resolve(id, product)
    }

    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<Product> {
        self.ensure_category(product.category_id)?;
        let mut products = self.products.borrow_mut();
        let slot = products
            .iter_mut()
            .find(|(product_id, _)| *product_id == id)
            .ok_or(RepositoryError::NotFound)?;
        slot.1 = product.clone();
        drop(products);
        self.resolve(id, product)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        let mut products = self.products.borrow_mut();
        let before = products.len();
        products.retain(|(product_id, _)| *product_id != id);
        Ok(before - products.len())
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        let mut items: Vec<Category> = self.categories.borrow().clone();
        if let Some(search) = &query.search {
            items.retain(|c| contains_ignore_case(&c.name, search));
        }
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let category = Category {
            id: CategoryId::new(self.allocate_id())?,
            name: category.name.clone(),
        };
        self.categories.borrow_mut().push(category.clone());
        Ok(category)
    }

    fn update_category(
        &self,
        id: CategoryId,
        category: &NewCategory,
    ) -> RepositoryResult<Category> {
        let mut categories = self.categories.borrow_mut();
        let existing = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        existing.name = category.name.clone();
        Ok(existing.clone())
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        self.products
            .borrow_mut()
            .retain(|(_, product)| product.category_id != id);
        let mut categories = self.categories.borrow_mut();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(before - categories.len())
    }
}
