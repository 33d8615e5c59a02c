//! Sparse coupon updates.

use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::domain::coupons::{data::CouponUpdate, records::CouponUuid};

/// Column stamped with the store's clock on every update.
pub const LAST_MODIFIED_COLUMN: &str = "last_modified";

/// One field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSet {
    Name(String),
    Brand(String),
    Value(Decimal),
    Expiry(Timestamp),
}

impl FieldSet {
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Brand(_) => "brand",
            Self::Value(_) => "value",
            Self::Expiry(_) => "expiry",
        }
    }
}

/// The assignments for a single coupon, matched by its own identifier.
///
/// `last_modified` is always touched, even when `fields` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseUpdate {
    pub uuid: CouponUuid,
    pub fields: SmallVec<[FieldSet; 4]>,
}

/// Compile an update into the assignments it actually carries.
#[must_use]
pub fn compile_update(update: &CouponUpdate) -> SparseUpdate {
    let mut fields = SmallVec::new();

    if let Some(name) = update.name.as_ref().filter(|name| !name.is_empty()) {
        fields.push(FieldSet::Name(name.clone()));
    }

    if let Some(brand) = update.brand.as_ref().filter(|brand| !brand.is_empty()) {
        fields.push(FieldSet::Brand(brand.clone()));
    }

    if let Some(value) = update.value {
        fields.push(FieldSet::Value(value));
    }

    if let Some(expiry) = update.expiry {
        fields.push(FieldSet::Expiry(expiry));
    }

    SparseUpdate {
        uuid: update.uuid,
        fields,
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use testresult::TestResult;

    use super::*;

    fn empty_update(uuid: CouponUuid) -> CouponUpdate {
        CouponUpdate {
            uuid,
            name: None,
            brand: None,
            value: None,
            expiry: None,
        }
    }

    #[test]
    fn empty_update_only_matches_by_id() {
        let uuid = CouponUuid::new();

        assert_eq!(
            compile_update(&empty_update(uuid)),
            SparseUpdate {
                uuid,
                fields: smallvec![],
            }
        );
    }

    #[test]
    fn every_present_field_is_assigned() -> TestResult {
        let uuid = CouponUuid::new();
        let expiry: Timestamp = "2020-12-31T23:59:59Z".parse()?;

        let sparse = compile_update(&CouponUpdate {
            uuid,
            name: Some("Save £2 at Tesco".to_string()),
            brand: Some("Tesco".to_string()),
            value: Some(Decimal::TWO),
            expiry: Some(expiry),
        });

        let columns: Vec<&str> = sparse.fields.iter().map(FieldSet::column).collect();

        assert_eq!(columns, vec!["name", "brand", "value", "expiry"]);
        assert_eq!(sparse.uuid, uuid);

        Ok(())
    }

    #[test]
    fn zero_value_is_written() {
        let uuid = CouponUuid::new();

        let sparse = compile_update(&CouponUpdate {
            value: Some(Decimal::ZERO),
            ..empty_update(uuid)
        });

        assert_eq!(sparse.fields.as_slice(), &[FieldSet::Value(Decimal::ZERO)]);
    }

    #[test]
    fn empty_strings_are_skipped() {
        let uuid = CouponUuid::new();

        let sparse = compile_update(&CouponUpdate {
            name: Some(String::new()),
            brand: Some(String::new()),
            ..empty_update(uuid)
        });

        assert!(sparse.fields.is_empty());
    }
}
