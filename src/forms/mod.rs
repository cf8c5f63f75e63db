//! Request payloads and their validation into domain values.

pub mod categories;
pub mod products;
