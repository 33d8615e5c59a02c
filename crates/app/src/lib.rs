//! Coupon domain, validation and persistence shared by the coupon services.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

pub mod uuids;
