//! Coupon identifiers as they arrive from callers.
//!
//! Callers may send a native UUID, a number, or an arbitrary string as a
//! coupon id. Each shape has its own notion of "was an id supplied at all",
//! exposed through [`Presence`]; only native ids resolve to stored coupons.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::coupons::records::CouponUuid;

/// Whether a caller actually supplied a value.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for Uuid {
    fn is_present(&self) -> bool {
        !self.is_nil()
    }
}

impl Presence for i64 {
    fn is_present(&self) -> bool {
        *self >= 1
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// An inbound coupon identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CouponId {
    Native(Uuid),
    Numeric(i64),
    Text(String),
}

impl CouponId {
    /// The stored-coupon identifier, when this id is a native one.
    #[must_use]
    pub fn as_native(&self) -> Option<CouponUuid> {
        match self {
            Self::Native(uuid) => Some(CouponUuid::from_uuid(*uuid)),
            Self::Numeric(_) | Self::Text(_) => None,
        }
    }
}

impl Presence for CouponId {
    fn is_present(&self) -> bool {
        match self {
            Self::Native(uuid) => uuid.is_present(),
            Self::Numeric(number) => number.is_present(),
            Self::Text(text) => text.is_present(),
        }
    }
}

impl From<CouponUuid> for CouponId {
    fn from(uuid: CouponUuid) -> Self {
        Self::Native(uuid.into_uuid())
    }
}
