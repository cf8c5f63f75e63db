pub use errors::{Resource, ServiceError, ServiceResult};

pub mod categories;
pub mod errors;
pub mod products;
