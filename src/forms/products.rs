use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, ProductFilter};
use crate::domain::types::{
    CategoryId, ProductDescription, ProductId, ProductName, ProductPrice, ProductRating,
    SalesCount, TypeConstraintError,
};

/// Reference to the category a product belongs to. Only the id is read.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRefForm {
    #[validate(range(min = 1))]
    pub id: i32,
}

/// JSON body accepted by `POST /produtos` and `PUT /produtos`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    /// Ignored on create, required on update.
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub sales_count: i32,
    #[serde(default)]
    pub rating: f64,
    #[validate(nested)]
    pub category: CategoryRefForm,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductPayload {
    pub product: NewProduct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductPayload {
    pub product_id: ProductId,
    pub product: NewProduct,
}

#[derive(Debug, Error)]
pub enum ProductFormError {
    #[error("Product form validation failed: {0}")]
    Validation(String),
    #[error("Product form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Product id is required")]
    MissingId,
}

impl From<ValidationErrors> for ProductFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProductFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl ProductForm {
    fn into_new_product(self) -> Result<NewProduct, ProductFormError> {
        self.validate()?;
        Ok(NewProduct {
            name: ProductName::new(self.name)?,
            description: ProductDescription::new(self.description)?,
            price: ProductPrice::new(self.price)?,
            sales_count: SalesCount::new(self.sales_count),
            rating: ProductRating::new(self.rating)?,
            category_id: CategoryId::new(self.category.id)?,
        })
    }
}

impl TryFrom<ProductForm> for CreateProductPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        Ok(Self {
            product: value.into_new_product()?,
        })
    }
}

impl TryFrom<ProductForm> for UpdateProductPayload {
    type Error = ProductFormError;

    fn try_from(value: ProductForm) -> Result<Self, Self::Error> {
        let product_id = ProductId::new(value.id.ok_or(ProductFormError::MissingId)?)?;
        Ok(Self {
            product_id,
            product: value.into_new_product()?,
        })
    }
}

/// Query string accepted by `GET /produtos/filtrar`.
///
/// Values arrive as raw strings so that an empty parameter (`?precoMin=`)
/// can be treated as absent rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterProductsQuery {
    pub preco_min: Option<String>,
    pub preco_max: Option<String>,
    pub categoria_id: Option<String>,
    pub nome: Option<String>,
    pub avaliacao_min: Option<String>,
}

/// Query string accepted by `GET /produtos/mais-vendidos`.
#[derive(Debug, Default, Deserialize)]
pub struct BestSellersQuery {
    pub limit: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterProductsQueryError {
    #[error("Parameter {field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_param<T: FromStr>(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<T>, FilterProductsQueryError> {
    match present(value) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(FilterProductsQueryError::InvalidNumber { field, value: raw }),
        },
    }
}

fn parse_bound(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<f64>, FilterProductsQueryError> {
    match parse_param::<f64>(value.clone(), field)? {
        Some(bound) if !bound.is_finite() => Err(FilterProductsQueryError::InvalidNumber {
            field,
            value: value.unwrap_or_default(),
        }),
        bound => Ok(bound),
    }
}

impl TryFrom<FilterProductsQuery> for ProductFilter {
    type Error = FilterProductsQueryError;

    fn try_from(value: FilterProductsQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            price_min: parse_bound(value.preco_min, "precoMin")?,
            price_max: parse_bound(value.preco_max, "precoMax")?,
            category_id: parse_param(value.categoria_id, "categoriaId")?,
            name_contains: present(value.nome),
            rating_min: parse_bound(value.avaliacao_min, "avaliacaoMin")?,
        })
    }
}

impl BestSellersQuery {
    /// Requested number of products; an empty `limit=` counts as absent.
    pub fn limit(self) -> Result<Option<usize>, FilterProductsQueryError> {
        parse_param(self.limit, "limit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> ProductForm {
        ProductForm {
            id: None,
            name: "Widget".to_string(),
            description: "A small widget".to_string(),
            price: 9.99,
            sales_count: 5,
            rating: 4.5,
            category: CategoryRefForm { id: 1 },
        }
    }

    #[test]
    fn create_payload_ignores_id() {
        let mut form = sample_form();
        form.id = Some(42);

        let payload: CreateProductPayload = form.try_into().unwrap();
        assert_eq!(payload.product.name.as_str(), "Widget");
        assert_eq!(payload.product.category_id.get(), 1);
        assert_eq!(payload.product.price, 9.99);
    }

    #[test]
    fn update_payload_requires_id() {
        let result: Result<UpdateProductPayload, _> = sample_form().try_into();
        assert!(matches!(result, Err(ProductFormError::MissingId)));

        let mut form = sample_form();
        form.id = Some(7);
        let payload: UpdateProductPayload = form.try_into().unwrap();
        assert_eq!(payload.product_id.get(), 7);
    }

    #[test]
    fn rejects_overlong_names() {
        let mut form = sample_form();
        form.name = "x".repeat(256);

        let result: Result<CreateProductPayload, _> = form.try_into();
        assert!(matches!(result, Err(ProductFormError::Validation(_))));
    }

    #[test]
    fn rejects_blank_description() {
        let mut form = sample_form();
        form.description = "   ".to_string();

        let result: Result<CreateProductPayload, _> = form.try_into();
        assert!(matches!(result, Err(ProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn rejects_rating_beyond_one_digit() {
        let mut form = sample_form();
        form.rating = 12.0;

        let result: Result<CreateProductPayload, _> = form.try_into();
        assert!(matches!(result, Err(ProductFormError::TypeConstraint(_))));
    }

    #[test]
    fn numeric_fields_default_to_zero() {
        let form: ProductForm = serde_json::from_str(
            r#"{"name":"Widget","description":"desc","category":{"id":3,"name":"ignored"}}"#,
        )
        .unwrap();

        let payload: CreateProductPayload = form.try_into().unwrap();
        assert_eq!(payload.product.price, 0.0);
        assert_eq!(payload.product.sales_count, 0);
        assert_eq!(payload.product.rating, 0.0);
    }

    #[test]
    fn empty_filter_query_imposes_nothing() {
        let filter: ProductFilter = FilterProductsQuery::default().try_into().unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn blank_parameters_are_absent_but_zero_is_present() {
        let query = FilterProductsQuery {
            preco_min: Some("0".into()),
            preco_max: Some("".into()),
            nome: Some("".into()),
            ..Default::default()
        };

        let filter: ProductFilter = query.try_into().unwrap();
        assert_eq!(filter.price_min, Some(0.0));
        assert_eq!(filter.price_max, None);
        assert_eq!(filter.name_contains, None);
    }

    #[test]
    fn parses_every_parameter() {
        let query = FilterProductsQuery {
            preco_min: Some("1.5".into()),
            preco_max: Some("20".into()),
            categoria_id: Some("2".into()),
            nome: Some("widg".into()),
            avaliacao_min: Some("3.5".into()),
        };

        let filter: ProductFilter = query.try_into().unwrap();
        assert_eq!(filter.price_min, Some(1.5));
        assert_eq!(filter.price_max, Some(20.0));
        assert_eq!(filter.category_id, Some(2));
        assert_eq!(filter.name_contains.as_deref(), Some("widg"));
        assert_eq!(filter.rating_min, Some(3.5));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_bounds() {
        let query = FilterProductsQuery {
            preco_min: Some("cheap".into()),
            ..Default::default()
        };
        assert_eq!(
            ProductFilter::try_from(query).unwrap_err(),
            FilterProductsQueryError::InvalidNumber {
                field: "precoMin",
                value: "cheap".into()
            }
        );

        let query = FilterProductsQuery {
            avaliacao_min: Some("NaN".into()),
            ..Default::default()
        };
        assert!(ProductFilter::try_from(query).is_err());
    }

    #[test]
    fn keeps_non_positive_category_as_constraint() {
        let query = FilterProductsQuery {
            categoria_id: Some("0".into()),
            ..Default::default()
        };
        assert_eq!(ProductFilter::try_from(query).unwrap().category_id, Some(0));

        let query = FilterProductsQuery {
            categoria_id: Some("-4".into()),
            ..Default::default()
        };
        assert_eq!(ProductFilter::try_from(query).unwrap().category_id, Some(-4));
    }

    #[test]
    fn accepts_negative_sales_count() {
        let mut form = sample_form();
        form.sales_count = -3;

        let payload: CreateProductPayload = form.try_into().unwrap();
        assert_eq!(payload.product.sales_count, -3);
    }

    #[test]
    fn best_sellers_limit_treats_blank_as_absent() {
        let query = BestSellersQuery {
            limit: Some("".into()),
        };
        assert_eq!(query.limit().unwrap(), None);

        let query = BestSellersQuery {
            limit: Some("3".into()),
        };
        assert_eq!(query.limit().unwrap(), Some(3));

        let query = BestSellersQuery {
            limit: Some("-1".into()),
        };
        assert!(query.limit().is_err());
    }
}
