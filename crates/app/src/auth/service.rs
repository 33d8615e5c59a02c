//! Auth service.

use std::fmt;

use mockall::automock;
use zeroize::Zeroizing;

use crate::auth::AuthServiceError;

/// Checks the shared secret every request carries.
#[derive(Clone)]
pub struct SharedSecretAuth {
    api_key: Zeroizing<String>,
}

impl SharedSecretAuth {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Zeroizing::new(api_key.into()),
        }
    }
}

impl fmt::Debug for SharedSecretAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecretAuth(**redacted**)")?;
        Ok(())
    }
}

impl AuthService for SharedSecretAuth {
    fn authenticate(&self, api_key: &str) -> Result<(), AuthServiceError> {
        if api_key.is_empty() {
            return Err(AuthServiceError::Missing);
        }

        if !constant_time_eq(api_key.as_bytes(), self.api_key.as_bytes()) {
            return Err(AuthServiceError::Mismatch);
        }

        Ok(())
    }
}

#[automock]
pub trait AuthService: Send + Sync {
    /// Accept the request only when `api_key` matches the configured secret.
    fn authenticate(&self, api_key: &str) -> Result<(), AuthServiceError>;
}

/// Compare without short-circuiting on the first differing byte.
fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter()
        .zip(right)
        .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
