//! State

use std::sync::Arc;

use coupons_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    /// Log request data at debug level.
    pub(crate) debug: bool,
    /// Largest request body read, in bytes.
    pub(crate) max_body_size: usize,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, debug: bool, max_body_size: usize) -> Self {
        Self {
            app,
            debug,
            max_body_size,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: AppContext,
        debug: bool,
        max_body_size: usize,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, debug, max_body_size))
    }
}
