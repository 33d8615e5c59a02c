//! Update Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use coupons_app::domain::coupons::{
    data::CouponCollection, records::CouponUuid, validation::validate_many_for_update,
};

use crate::{
    coupons::{
        errors::{into_api_error, validation_error},
        models::{CouponResponse, into_responses},
    },
    envelope::{ApiError, ApiResponse, RequestData},
    extensions::*,
    state::State,
};

use super::extract;

/// Validate and apply a batch of sparse coupon updates, responding with the
/// coupons as stored afterwards.
#[handler]
#[tracing::instrument(name = "coupons.update", skip(depot), fields(modified = tracing::field::Empty))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<CouponResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let data = depot.obtain_or_500::<RequestData>()?;

    let collection: Option<CouponCollection> = extract(data, "failed to parse coupons request")?;

    let updates = validate_many_for_update(collection.as_ref()).map_err(validation_error)?;

    let uuids: Vec<CouponUuid> = updates.iter().map(|update| update.uuid).collect();

    let modified = state
        .app
        .coupons
        .update_many(updates)
        .await
        .map_err(|error| into_api_error(&error, "failed to update coupons in the db"))?;

    tracing::Span::current().record("modified", modified);

    info!(modified, requested = uuids.len(), "updated coupons");

    let updated = state
        .app
        .coupons
        .find_by_uuids(uuids)
        .await
        .map_err(|error| into_api_error(&error, "failed to read coupons from the db"))?;

    Ok(Json(ApiResponse::result(into_responses(updated))))
}
