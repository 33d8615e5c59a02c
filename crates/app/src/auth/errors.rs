//! Auth service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("api key was not provided")]
    Missing,

    #[error("api key does not match")]
    Mismatch,
}
