use thiserror::Error;

/// Kind of entity a lookup failed to find.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    #[error("product")]
    Product,
    #[error("category")]
    Category,
}

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("{0} not found")]
    NotFound(Resource),
    /// Submitted data could not be turned into a valid payload.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
