//! Envelope and shared-secret middleware.
//!
//! Parses the `{apiKey, data}` body every coupon request carries, rejects
//! callers without the right key, and leaves the payload in the depot for
//! the verb handlers.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{debug, warn};

use crate::{
    envelope::{ApiError, ApiRequest, RequestData},
    extensions::*,
    state::State,
};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(data) => {
            depot.inject(data);

            ctrl.call_next(req, depot, res).await;
        }
        Err(error) => {
            res.render(error);

            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &mut Request, depot: &Depot) -> Result<RequestData, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let body = req
        .payload_with_max_size(state.max_body_size)
        .await
        .or_400("failed to read request")?
        .clone();

    let request: ApiRequest =
        serde_json::from_slice(&body).or_400("failed to parse request")?;

    // The envelope carries the api key, only its data may be logged.
    if let Some(data) = request.data.as_ref().filter(|_| state.debug) {
        debug!(%data, "request data");
    }

    if let Err(error) = state.app.auth.authenticate(&request.api_key) {
        warn!(%error, "rejected request");

        return Err(ApiError::forbidden());
    }

    Ok(RequestData(request.data))
}
