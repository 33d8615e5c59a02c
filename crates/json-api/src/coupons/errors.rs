//! Coupon Errors

use salvo::http::StatusCode;
use tracing::{error, warn};

use coupons_app::domain::coupons::{CouponsServiceError, validation::ValidationErrors};

use crate::envelope::ApiError;

/// Every validation message is reported, none of the batch is persisted.
pub(crate) fn validation_error(errors: ValidationErrors) -> ApiError {
    warn!(%errors, "rejected invalid coupons");

    ApiError::new(StatusCode::BAD_REQUEST, errors.into_messages())
}

/// Map a service failure to a response, prefixing the caller-facing message
/// with what was being attempted.
pub(crate) fn into_api_error(error: &CouponsServiceError, context: &str) -> ApiError {
    let message = format!("{context}: {error}");

    match error {
        CouponsServiceError::Filter(_) => {
            warn!("{message}");

            ApiError::bad_request(error.to_string())
        }
        error if error.is_timeout() => {
            error!(error = ?error, "{context}");

            ApiError::gateway_timeout(message)
        }
        _ => {
            error!(error = ?error, "{context}");

            ApiError::internal(message)
        }
    }
}
