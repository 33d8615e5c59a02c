//! List Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use coupons_app::domain::coupons::data::CouponFilter;

use crate::{
    coupons::{
        errors::into_api_error,
        models::{CouponResponse, into_responses},
    },
    envelope::{ApiError, ApiResponse, RequestData},
    extensions::*,
    state::State,
};

use super::extract;

/// Search coupons with the filter carried in `data`.
#[handler]
#[tracing::instrument(name = "coupons.index", skip(depot), fields(found = tracing::field::Empty))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ApiResponse<Vec<CouponResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let data = depot.obtain_or_500::<RequestData>()?;

    let filter: Option<CouponFilter> = extract(data, "failed to parse filter from the request")?;

    let coupons = state
        .app
        .coupons
        .search(filter)
        .await
        .map_err(|error| into_api_error(&error, "failed to search coupons"))?;

    tracing::Span::current().record("found", coupons.len());

    info!(found = coupons.len(), "listed coupons");

    Ok(Json(ApiResponse::result(into_responses(coupons))))
}
