//! Coupon Handlers

pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update;

use serde::de::DeserializeOwned;

use crate::{
    envelope::{ApiError, RequestData},
    extensions::*,
};

/// Decode the request payload; an absent or `null` payload yields `None`.
fn extract<T: DeserializeOwned>(data: &RequestData, context: &str) -> Result<Option<T>, ApiError> {
    data.0
        .as_ref()
        .filter(|value| !value.is_null())
        .map(T::deserialize)
        .transpose()
        .or_400(context)
}
