//! Coupon search predicates.
//!
//! A [`CouponFilter`] compiles into a [`Predicate`]: a conjunction of
//! clauses, one per criterion the caller actually filled in. The predicate
//! is independent of any store; the repository renders it to SQL and
//! [`Predicate::matches`] evaluates it in memory.

use jiff::Timestamp;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::coupons::{
    data::CouponFilter,
    records::{CouponRecord, CouponUuid},
};

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Search criteria must be provided")]
    MissingCriteria,

    #[error("invalid coupon id \"{id}\"")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: uuid::Error,
    },
}

/// Inclusive bounds, either of which may be open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds<T> {
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T: PartialOrd> Bounds<T> {
    /// `None` when both ends are open, so no clause is emitted.
    fn new(from: Option<T>, to: Option<T>) -> Option<Self> {
        (from.is_some() || to.is_some()).then_some(Self { from, to })
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.from.as_ref().is_none_or(|from| value >= from)
            && self.to.as_ref().is_none_or(|to| value <= to)
    }
}

/// A single condition on one coupon field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    IdIn(Vec<CouponUuid>),
    Value(Bounds<Decimal>),
    NameContains(String),
    BrandEquals(String),
    Expiry(Bounds<Timestamp>),
    CreatedAt(Bounds<Timestamp>),
}

impl Clause {
    #[must_use]
    pub fn matches(&self, coupon: &CouponRecord) -> bool {
        match self {
            Self::IdIn(uuids) => uuids.contains(&coupon.uuid),
            Self::Value(bounds) => bounds.contains(&coupon.value),
            Self::NameContains(text) => coupon.name.contains(text.as_str()),
            Self::BrandEquals(brand) => coupon.brand == *brand,
            Self::Expiry(bounds) => bounds.contains(&coupon.expiry),
            Self::CreatedAt(bounds) => bounds.contains(&coupon.created_at),
        }
    }
}

/// Conjunction of clauses. An empty predicate matches every coupon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: SmallVec<[Clause; 6]>,
}

impl Predicate {
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn matches(&self, coupon: &CouponRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(coupon))
    }
}

/// Compile search criteria into a predicate.
///
/// # Errors
///
/// Returns [`FilterError::MissingCriteria`] when no filter was sent, and
/// [`FilterError::InvalidIdentifier`] when any id in `idIn` does not parse.
pub fn compile(filter: Option<&CouponFilter>) -> Result<Predicate, FilterError> {
    let filter = filter.ok_or(FilterError::MissingCriteria)?;

    let mut clauses = SmallVec::new();

    if !filter.id_in.is_empty() {
        let uuids = filter
            .id_in
            .iter()
            .map(|id| {
                id.parse::<CouponUuid>()
                    .map_err(|source| FilterError::InvalidIdentifier {
                        id: id.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        clauses.push(Clause::IdIn(uuids));
    }

    if let Some(bounds) = Bounds::new(filter.value_from, filter.value_to) {
        clauses.push(Clause::Value(bounds));
    }

    if let Some(name) = non_empty(filter.name_contains.as_deref()) {
        clauses.push(Clause::NameContains(name.to_string()));
    }

    if let Some(brand) = non_empty(filter.brand_equal.as_deref()) {
        clauses.push(Clause::BrandEquals(brand.to_string()));
    }

    if let Some(bounds) = Bounds::new(filter.expiry_from, filter.expiry_to) {
        clauses.push(Clause::Expiry(bounds));
    }

    if let Some(bounds) = Bounds::new(filter.created_at_from, filter.created_at_to) {
        clauses.push(Clause::CreatedAt(bounds));
    }

    Ok(Predicate { clauses })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
