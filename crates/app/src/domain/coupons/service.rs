//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, error, info};

use crate::{
    database::Db,
    domain::coupons::{
        data::{CouponFilter, CouponUpdate, NewCoupon},
        errors::CouponsServiceError,
        filter::compile,
        records::{CouponRecord, CouponUuid},
        repository::PgCouponsRepository,
        update::compile_update,
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    repository: PgCouponsRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn create_many(
        &self,
        coupons: Vec<NewCoupon>,
    ) -> Result<Vec<CouponUuid>, CouponsServiceError> {
        if coupons.is_empty() {
            return Ok(Vec::new());
        }

        let coupons: Vec<(CouponUuid, NewCoupon)> = coupons
            .into_iter()
            .map(|coupon| (CouponUuid::new(), coupon))
            .collect();

        let inserted = self
            .db
            .bounded(async {
                let mut conn = self.db.pool().acquire().await?;

                self.repository.create_coupons(&mut conn, &coupons).await
            })
            .await
            .inspect_err(|error| error!(%error, "failed to insert coupons"))?;

        info!(inserted, "inserted coupons");

        Ok(coupons.into_iter().map(|(uuid, _coupon)| uuid).collect())
    }

    async fn update_many(&self, updates: Vec<CouponUpdate>) -> Result<u64, CouponsServiceError> {
        let mut modified = 0;

        for update in &updates {
            let sparse = compile_update(update);

            debug!(uuid = %sparse.uuid, fields = sparse.fields.len(), "updating coupon");

            let result = self
                .db
                .bounded(async {
                    let mut conn = self.db.pool().acquire().await?;

                    self.repository.update_coupon(&mut conn, &sparse).await
                })
                .await;

            match result {
                Ok(rows_affected) => modified += rows_affected,
                Err(source) => {
                    error!(error = %source, modified, "coupon update interrupted");

                    return Err(CouponsServiceError::Interrupted {
                        modified,
                        source: Box::new(source.into()),
                    });
                }
            }
        }

        info!(modified, requested = updates.len(), "updated coupons");

        Ok(modified)
    }

    async fn find_by_uuids(
        &self,
        uuids: Vec<CouponUuid>,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        if uuids.is_empty() {
            return Ok(Vec::new());
        }

        let coupons = self
            .db
            .bounded(async {
                let mut conn = self.db.pool().acquire().await?;

                self.repository
                    .find_coupons_by_uuids(&mut conn, &uuids)
                    .await
            })
            .await
            .inspect_err(|error| error!(%error, "failed to fetch coupons"))?;

        Ok(coupons)
    }

    async fn search(
        &self,
        filter: Option<CouponFilter>,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError> {
        let predicate = compile(filter.as_ref())?;

        debug!(?predicate, "searching coupons");

        let coupons = self
            .db
            .bounded(async {
                let mut conn = self.db.pool().acquire().await?;

                self.repository.search_coupons(&mut conn, &predicate).await
            })
            .await
            .inspect_err(|error| error!(%error, "failed to search coupons"))?;

        info!(found = coupons.len(), "searched coupons");

        Ok(coupons)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Insert every coupon atomically, returning the assigned identifiers in
    /// input order.
    async fn create_many(
        &self,
        coupons: Vec<NewCoupon>,
    ) -> Result<Vec<CouponUuid>, CouponsServiceError>;

    /// Apply each update independently, returning how many coupons changed.
    ///
    /// Unknown identifiers are not an error; they simply modify nothing.
    async fn update_many(&self, updates: Vec<CouponUpdate>) -> Result<u64, CouponsServiceError>;

    /// Fetch coupons by identifier.
    async fn find_by_uuids(
        &self,
        uuids: Vec<CouponUuid>,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError>;

    /// Search coupons matching every criterion the filter fills in.
    async fn search(
        &self,
        filter: Option<CouponFilter>,
    ) -> Result<Vec<CouponRecord>, CouponsServiceError>;
}
