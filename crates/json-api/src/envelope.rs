//! Request and response envelopes shared by every coupon endpoint.

use salvo::{
    http::StatusCode,
    prelude::{Json, Response, Scribe},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound request body: the shared secret plus a verb-specific payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRequest {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// The `data` member of an authenticated request, stored in the depot.
#[derive(Debug, Clone, Default)]
pub(crate) struct RequestData(pub Option<Value>);

/// Outbound body. Exactly one of `error` and `result` is set.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn result(result: T) -> Self {
        Self {
            error: None,
            result: Some(result),
        }
    }
}

/// An error response: a status code and the messages reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ApiError {
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, messages: Vec<String>) -> Self {
        Self { status, messages }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, vec![message.into()])
    }

    pub(crate) fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, vec!["Forbidden".to_string()])
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, vec![message.into()])
    }

    pub(crate) fn gateway_timeout(message: impl Into<String>) -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, vec![message.into()])
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.status_code(self.status);
        res.render(Json(ApiResponse::<()> {
            error: Some(self.messages),
            result: None,
        }));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn request_fields_default_when_missing() -> TestResult {
        let request: ApiRequest = serde_json::from_value(json!({}))?;

        assert!(request.api_key.is_empty());
        assert!(request.data.is_none());

        Ok(())
    }

    #[test]
    fn result_response_omits_error() -> TestResult {
        let body = serde_json::to_value(ApiResponse::result(vec![1, 2]))?;

        assert_eq!(body, json!({ "result": [1, 2] }));

        Ok(())
    }
}
