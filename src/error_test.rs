use super::*;

#[derive(Debug, thiserror::Error)]
#[error("thing exploded")]
struct Exploded;

impl ErrorCode for Exploded {
    fn error_code(&self) -> &'static str {
        "E_EXPLODED"
    }
}

#[derive(Debug, thiserror::Error)]
#[error("try later")]
struct Flaky;

impl ErrorCode for Flaky {
    fn error_code(&self) -> &'static str {
        "E_FLAKY"
    }

    fn retryable(&self) -> bool {
        true
    }
}

#[test]
fn api_error_copies_code_message_and_retryable() {
    let err = ApiError::new(StatusCode::CONFLICT, &Exploded);
    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(err.body, ErrorBody { code: "E_EXPLODED", message: "thing exploded".into(), retryable: false });
}

#[test]
fn retryable_defaults_to_false_but_can_be_overridden() {
    assert!(!Exploded.retryable());
    assert!(Flaky.retryable());
    assert!(ApiError::new(StatusCode::BAD_GATEWAY, &Flaky).body.retryable);
}

#[test]
fn into_response_uses_status() {
    let resp = ApiError::new(StatusCode::NOT_FOUND, &Exploded).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn error_body_serializes_flat() {
    let body = ErrorBody { code: "E_FLAKY", message: "try later".into(), retryable: true };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "code": "E_FLAKY", "message": "try later", "retryable": true }));
}
