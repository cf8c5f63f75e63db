use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::product::{NewProduct, Product};
use crate::db::unicode_lower;
use crate::domain::types::ProductId;
use crate::models::category::Category as DbCategory;
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::repository::{
    DieselRepository, ProductListQuery, ProductOrder, ProductReader, ProductWriter,
    RepositoryError, RepositoryResult, contains_pattern,
};

/// Map a left-joined row onto a domain product.
fn into_domain(
    (product, category): (DbProduct, Option<DbCategory>),
) -> RepositoryResult<Product> {
    let category = category.ok_or_else(|| {
        RepositoryError::ValidationError(format!(
            "product {} references missing category {}",
            product.id, product.category_id
        ))
    })?;
    Ok(Product::try_from((product, category))?)
}

fn load_product(conn: &mut SqliteConnection, id: i32) -> RepositoryResult<Option<Product>> {
    use crate::schema::{categories, products};

    let row = products::table
        .left_join(categories::table)
        .filter(products::id.eq(id))
        .select((DbProduct::as_select(), Option::<DbCategory>::as_select()))
        .first::<(DbProduct, Option<DbCategory>)>(conn)
        .optional()?;

    row.map(into_domain).transpose()
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        use crate::schema::{categories, products};

        let mut conn = self.conn()?;

        // The category join is unconditional so every product carries it.
        let mut items = products::table
            .left_join(categories::table)
            .select((DbProduct::as_select(), Option::<DbCategory>::as_select()))
            .into_boxed::<Sqlite>();

        let filter = &query.filter;

        if let Some(price_min) = filter.price_min {
            items = items.filter(products::price.ge(price_min));
        }

        if let Some(price_max) = filter.price_max {
            items = items.filter(products::price.le(price_max));
        }

        if let Some(category_id) = filter.category_id {
            items = items.filter(products::category_id.eq(category_id));
        }

        // Both sides are lowercased in Rust so non-ASCII letters fold too.
        if let Some(name) = &filter.name_contains {
            items = items.filter(
                unicode_lower(products::name)
                    .like(contains_pattern(&name.to_lowercase()))
                    .escape('\\'),
            );
        }

        if let Some(rating_min) = filter.rating_min {
            items = items.filter(products::rating.ge(rating_min));
        }

        items = match query.order {
            ProductOrder::Id => items.order(products::id.asc()),
            ProductOrder::BestSelling => {
                items.order((products::sales_count.desc(), products::id.asc()))
            }
        };

        if let Some(limit) = query.limit {
            items = items.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        items
            .load::<(DbProduct, Option<DbCategory>)>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let mut conn = self.conn()?;
        load_product(&mut conn, id.get())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from(product);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let id = diesel::insert_into(products::table)
                .values(&db_product)
                .returning(products::id)
                .get_result::<i32>(conn)?;

            load_product(conn, id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_product(&self, id: ProductId, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product = DbNewProduct::from(product);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(products::table.find(id.get()))
                .set(&db_product)
                .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            load_product(conn, id.get())?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<usize> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let affected = diesel::delete(products::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
