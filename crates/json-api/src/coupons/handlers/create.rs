//! Create Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use coupons_app::domain::coupons::{data::CouponCollection, validation::validate_many_for_insert};

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

/// Validate and insert a batch of coupons, responding with the stored rows.
#[handler]
#[tracing::instrument(name = "coupons.create", skip(depot), fields(created = tracing::field::Empty))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<CouponResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let data = depot.obtain_or_500::<RequestData>()?;

    let collection: Option<CouponCollection> = extract(data, "failed to parse coupons request")?;

    let coupons = validate_many_for_insert(collection.as_ref()).map_err(validation_error)?;

    let uuids = state
        .app
        .coupons
        .create_many(coupons)
        .await
        .map_err(|error| into_api_error(&error, "failed to write new coupons to the db"))?;

    tracing::Span::current().record("created", uuids.len());

    info!(created = uuids.len(), "created coupons");

    let created = state
        .app
        .coupons
        .find_by_uuids(uuids)
        .await
        .map_err(|error| into_api_error(&error, "failed to read coupons from the db"))?;

    Ok(Json(ApiResponse::result(into_responses(created))))
}
