//! Coupons service errors.

use std::time::Duration;

use thiserror::Error;

use crate::{database::DbError, domain::coupons::filter::FilterError};

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("storage call timed out after {0:?}")]
    Timeout(Duration),

    #[error("storage error: {0}")]
    Sql(#[source] sqlx::Error),

    /// An update batch stopped part way; `modified` is a lower bound.
    #[error("update stopped after {modified} modified coupons")]
    Interrupted {
        modified: u64,
        #[source]
        source: Box<CouponsServiceError>,
    },
}

impl CouponsServiceError {
    /// Whether this error, or the one that interrupted a batch, was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Interrupted { source, .. } => source.is_timeout(),
            Self::Sql(source) => matches!(source, sqlx::Error::PoolTimedOut),
            Self::Filter(_) => false,
        }
    }
}

impl From<DbError> for CouponsServiceError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::Timeout(limit) => Self::Timeout(limit),
            DbError::Sql(source) => Self::Sql(source),
        }
    }
}

impl From<sqlx::Error> for CouponsServiceError {
    fn from(error: sqlx::Error) -> Self {
        Self::Sql(error)
    }
}
