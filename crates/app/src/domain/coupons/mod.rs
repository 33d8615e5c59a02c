//! Coupons

pub mod data;
pub mod errors;
pub mod filter;
pub mod identifiers;
pub mod records;
mod repository;
pub mod service;
pub mod update;
pub mod validation;

pub use errors::CouponsServiceError;
pub use service::*;
