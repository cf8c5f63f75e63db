use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::NewCategory;
use crate::domain::types::{CategoryId, CategoryName, TypeConstraintError};

/// JSON body accepted by `POST /categorias` and `PUT /categorias`.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryForm {
    /// Ignored on create, required on update.
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryPayload {
    pub category: NewCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryPayload {
    pub category_id: CategoryId,
    pub category: NewCategory,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Category id is required")]
    MissingId,
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CreateCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category: NewCategory {
                name: CategoryName::new(value.name)?,
            },
        })
    }
}

impl TryFrom<CategoryForm> for UpdateCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let category_id = CategoryId::new(value.id.ok_or(CategoryFormError::MissingId)?)?;
        Ok(Self {
            category_id,
            category: NewCategory {
                name: CategoryName::new(value.name)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_category_trims_name() {
        let form = CategoryForm {
            id: None,
            name: "  Tools ".to_string(),
        };

        let payload: CreateCategoryPayload = form.try_into().unwrap();
        assert_eq!(payload.category.name.as_str(), "Tools");
    }

    #[test]
    fn create_category_rejects_empty_name() {
        let form = CategoryForm {
            id: None,
            name: String::new(),
        };

        let payload: Result<CreateCategoryPayload, _> = form.try_into();
        assert!(matches!(payload, Err(CategoryFormError::Validation(_))));
    }

    #[test]
    fn update_category_requires_positive_id() {
        let form = CategoryForm {
            id: Some(0),
            name: "Tools".to_string(),
        };

        let payload: Result<UpdateCategoryPayload, _> = form.try_into();
        assert!(matches!(payload, Err(CategoryFormError::TypeConstraint(_))));
    }
}
