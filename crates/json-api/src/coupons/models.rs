//! Coupon Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coupons_app::domain::coupons::records::CouponRecord;

/// Coupon Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CouponResponse {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub value: Decimal,
    pub expiry: Timestamp,
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
}

impl From<CouponRecord> for CouponResponse {
    fn from(coupon: CouponRecord) -> Self {
        Self {
            id: coupon.uuid.into_uuid(),
            name: coupon.name,
            brand: coupon.brand,
            value: coupon.value,
            expiry: coupon.expiry,
            created_at: coupon.created_at,
            last_modified: coupon.last_modified,
        }
    }
}

pub(crate) fn into_responses(coupons: Vec<CouponRecord>) -> Vec<CouponResponse> {
    coupons.into_iter().map(CouponResponse::from).collect()
}
