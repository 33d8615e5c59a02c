//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::warn;

use crate::envelope::ApiError;

/// Map any error to a logged, single-message bad request.
pub(crate) trait ResultExt<T> {
    fn or_400(self, context: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_400(self, context: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            let message = format!("{context}: {error}");

            warn!("{message}");

            ApiError::bad_request(message)
        })
    }
}
