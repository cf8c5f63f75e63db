//! Diesel row models and their mapping to domain types.

pub mod category;
pub mod config;
pub mod product;
