//! Coupon validation.
//!
//! Each batch is validated item by item and every failure of every item is
//! reported together. Nothing here touches storage.

use jiff::{RoundMode, Timestamp, TimestampRound, Unit};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::coupons::{
    data::{CouponCollection, CouponDraft, CouponUpdate, NewCoupon},
    identifiers::Presence,
};

/// Earliest accepted expiry for a new coupon: 2010-01-01T00:00:00Z.
pub const COUPON_MIN_EXPIRY: Timestamp = Timestamp::constant(1_262_304_000, 0);

const NO_COUPON_DATA: &str = "No coupon data provided";

const INSERT_PREFIX: &str = "ValidateNewCoupon";
const UPDATE_PREFIX: &str = "ValidateUpdateCoupon";

/// Every rule violation found in a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join("; "))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.0
    }
}

/// Validate a batch of coupons before they are inserted.
///
/// # Errors
///
/// Returns every violation when the batch is missing, empty, or any coupon
/// breaks an insert rule.
pub fn validate_many_for_insert(
    collection: Option<&CouponCollection>,
) -> Result<Vec<NewCoupon>, ValidationErrors> {
    validate_many(collection, validate_one_for_insert)
}

/// Validate a batch of coupon changes before they are applied.
///
/// # Errors
///
/// Returns every violation when the batch is missing, empty, or any coupon
/// breaks an update rule.
pub fn validate_many_for_update(
    collection: Option<&CouponCollection>,
) -> Result<Vec<CouponUpdate>, ValidationErrors> {
    validate_many(collection, validate_one_for_update)
}

fn validate_many<T>(
    collection: Option<&CouponCollection>,
    validator: fn(&CouponDraft) -> Result<T, Vec<String>>,
) -> Result<Vec<T>, ValidationErrors> {
    let Some(drafts) = collection
        .map(|collection| collection.coupons.as_slice())
        .filter(|drafts| !drafts.is_empty())
    else {
        return Err(ValidationErrors(vec![NO_COUPON_DATA.to_string()]));
    };

    let mut valid = Vec::with_capacity(drafts.len());
    let mut errors = Vec::new();

    for draft in drafts {
        match validator(draft) {
            Ok(item) => valid.push(item),
            Err(mut item_errors) => errors.append(&mut item_errors),
        }
    }

    if errors.is_empty() {
        Ok(valid)
    } else {
        Err(ValidationErrors(errors))
    }
}

fn validate_one_for_insert(draft: &CouponDraft) -> Result<NewCoupon, Vec<String>> {
    let mut errors = Vec::new();

    let name = non_empty(draft.name.as_deref());
    if name.is_none() {
        errors.push(format!("{INSERT_PREFIX}: Coupon name must be provided"));
    }

    let brand = non_empty(draft.brand.as_deref());
    if brand.is_none() {
        errors.push(format!("{INSERT_PREFIX}: Coupon brand must be provided"));
    }

    let value = draft.value.filter(|value| *value > Decimal::ZERO);
    if value.is_none() {
        errors.push(format!(
            "{INSERT_PREFIX}: A positive coupon value must be provided"
        ));
    }

    let expiry = draft.expiry.filter(|expiry| *expiry >= COUPON_MIN_EXPIRY);
    if expiry.is_none() {
        errors.push(format!(
            "{INSERT_PREFIX}: Coupon expiry date must be after {COUPON_MIN_EXPIRY}"
        ));
    }

    match (name, brand, value, expiry) {
        (Some(name), Some(brand), Some(value), Some(expiry)) => Ok(NewCoupon {
            name: name.to_string(),
            brand: brand.to_string(),
            value,
            expiry: to_stored_precision(expiry),
        }),
        _ => Err(errors),
    }
}

fn validate_one_for_update(draft: &CouponDraft) -> Result<CouponUpdate, Vec<String>> {
    let mut errors = Vec::new();

    let uuid = match draft.id.as_ref().filter(|id| id.is_present()) {
        Some(id) => {
            let uuid = id.as_native();

            if uuid.is_none() {
                errors.push(format!(
                    "{UPDATE_PREFIX}: Coupon id is not a valid coupon identifier"
                ));
            }

            uuid
        }
        None => {
            errors.push(format!("{UPDATE_PREFIX}: Coupon id must be provided"));

            None
        }
    };

    if draft.value.is_some_and(|value| value < Decimal::ZERO) {
        errors.push(format!(
            "{UPDATE_PREFIX}: A positive coupon value must be provided"
        ));
    }

    if draft.created_at.is_some() {
        errors.push(format!("{UPDATE_PREFIX}: CreatedAt is a read-only field"));
    }

    match uuid {
        Some(uuid) if errors.is_empty() => Ok(CouponUpdate {
            uuid,
            name: non_empty(draft.name.as_deref()).map(str::to_string),
            brand: non_empty(draft.brand.as_deref()).map(str::to_string),
            value: draft.value,
            expiry: draft.expiry.map(to_stored_precision),
        }),
        _ => Err(errors),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// `TIMESTAMPTZ` keeps microseconds, so anything finer is dropped here rather
/// than by the store. The threshold check runs on the caller's exact value.
fn to_stored_precision(timestamp: Timestamp) -> Timestamp {
    timestamp
        .round(
            TimestampRound::new()
                .smallest(Unit::Microsecond)
                .mode(RoundMode::Trunc),
        )
        .unwrap_or(timestamp)
}
