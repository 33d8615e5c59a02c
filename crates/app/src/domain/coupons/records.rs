//! Coupon Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Coupon UUID
pub type CouponUuid = TypedUuid<CouponRecord>;

/// Coupon Record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    #[serde(rename = "id")]
    pub uuid: CouponUuid,
    pub name: String,
    pub brand: String,
    pub value: Decimal,
    pub expiry: Timestamp,
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
}
