//! Assertions for the error contract:
//! `{"success": false, "error": <status>, "message": <fixed text>}`.
//!
//! Defined locally so these helpers do not depend on backend types.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderMap, WWW_AUTHENTICATE};
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    success: bool,
    error: u16,
    message: String,
}

/// Assert that a service response is the standard error for `expected_status`
/// carrying `expected_message`.
pub async fn assert_error_response<B>(
    resp: ServiceResponse<B>,
    expected_status: StatusCode,
    expected_message: &str,
) where
    B: MessageBody,
{
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_parts(status, &headers, &body, expected_status, expected_message);
}

/// Same checks over already-split response parts.
pub fn assert_error_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_message: &str,
) {
    assert_eq!(
        status,
        expected_status,
        "unexpected status; body: {}",
        String::from_utf8_lossy(body)
    );

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "error body should be JSON in the standard shape ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    assert!(!parsed.success, "error body must carry success=false");
    assert_eq!(parsed.error, expected_status.as_u16());
    assert_eq!(parsed.message, expected_message);

    if expected_status == StatusCode::UNAUTHORIZED {
        let challenge = headers
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(challenge, "Bearer", "401 responses carry a Bearer challenge");
    }
}
