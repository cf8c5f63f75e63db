//! Error conversion glue between layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the conversions live here. Consumers of the `data` feature get the
//! repository conversion; the form conversions need the `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::forms::categories::CategoryFormError;
    use crate::forms::products::{FilterProductsQueryError, ProductFormError};
    use crate::services::ServiceError;

    impl From<ProductFormError> for ServiceError {
        fn from(val: ProductFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<CategoryFormError> for ServiceError {
        fn from(val: CategoryFormError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }

    impl From<FilterProductsQueryError> for ServiceError {
        fn from(val: FilterProductsQueryError) -> Self {
            ServiceError::Form(val.to_string())
        }
    }
}
