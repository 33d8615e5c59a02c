//! App Router

use std::sync::Arc;

use salvo::{
    affix_state::inject,
    catcher::Catcher,
    compression::{Compression, CompressionLevel},
    prelude::*,
    trailing_slash::remove_slash,
};

use crate::{
    auth, coupons, envelope::ApiError, healthcheck, observability::request_logging, state::State,
};

/// Every coupon verb shares the root path and the envelope middleware.
pub(crate) fn coupons_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .get(coupons::index::handler)
        .post(coupons::create::handler)
        .put(coupons::update::handler)
}

pub(crate) fn app_router(state: Arc<State>) -> Router {
    Router::new()
        .hoop(request_logging)
        .hoop(CatchPanic::new())
        .hoop(
            Compression::new()
                .disable_all()
                .enable_gzip(CompressionLevel::Default)
                .min_length(0),
        )
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(coupons_router())
}

/// Errors raised by the router itself, such as an unknown method, still
/// answer with the `{error}` envelope.
#[handler]
async fn envelope_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    if !res.body.is_none() {
        return;
    }

    let status = res.status_code.unwrap_or(StatusCode::NOT_FOUND);

    let message = match status {
        StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED => "unknown request",
        _ => status.canonical_reason().unwrap_or("unknown error"),
    };

    res.render(ApiError::new(status, vec![message.to_string()]));

    ctrl.skip_rest();
}

pub(crate) fn app_service(state: Arc<State>) -> Service {
    Service::new(app_router(state)).catcher(Catcher::default().hoop(envelope_errors))
}
