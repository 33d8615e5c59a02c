//! Test Helpers

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::coupons::data::NewCoupon;

/// A valid coupon expiring at the end of 2030.
pub(crate) fn new_coupon(name: &str, brand: &str, value: i64) -> NewCoupon {
    NewCoupon {
        name: name.to_string(),
        brand: brand.to_string(),
        value: Decimal::from(value),
        expiry: Timestamp::constant(1_924_991_999, 0),
    }
}
