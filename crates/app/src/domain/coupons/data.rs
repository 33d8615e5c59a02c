//! Coupons Data

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::coupons::{identifiers::CouponId, records::CouponUuid};

/// A coupon as sent by a caller, before validation.
///
/// Every field tracks presence so that "not sent" and "sent as zero" stay
/// distinguishable all the way to the update compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CouponId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}

/// Batch of coupons for create and update requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouponCollection {
    #[serde(default)]
    pub coupons: Vec<CouponDraft>,
}

/// Query-by-example search criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CouponFilter {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub id_in: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_equal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_from: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_to: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_from: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_to: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_from: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_to: Option<Timestamp>,
}

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    pub name: String,
    pub brand: String,
    pub value: Decimal,
    pub expiry: Timestamp,
}

/// Coupon Update Data
///
/// `None` leaves the stored field untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponUpdate {
    pub uuid: CouponUuid,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub value: Option<Decimal>,
    pub expiry: Option<Timestamp>,
}
