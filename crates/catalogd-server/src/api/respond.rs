//! JSON response assembly shared by the API handlers.
//!
//! Every payload leaves with `Content-Type: application/json` and
//! `X-Content-Type-Options: nosniff`. Failures serialize into the flat
//! `{"error": message}` envelope the catalog's clients expect.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Serialize `data` into a 200 response.
pub(super) fn ok<T: Serialize>(data: &T) -> Response {
    match serde_json::to_vec(data) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(e) => {
            tracing::error!(error = %e, "response serialization failed");
            error(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

/// Build an error response carrying the `{"error": message}` envelope.
pub(super) fn error(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message })
        .to_string()
        .into_bytes();
    json_response(status, body)
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[derive(Serialize)]
    struct Sample {
        code: &'static str,
    }

    #[tokio::test]
    async fn ok_sets_json_and_nosniff_headers() {
        let response = ok(&Sample { code: "PROD001" });

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert_eq!(
            response.headers().get(header::X_CONTENT_TYPE_OPTIONS),
            Some(&HeaderValue::from_static("nosniff"))
        );

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["code"], "PROD001");
    }

    #[tokio::test]
    async fn error_wraps_message_in_error_envelope() {
        let response = error(StatusCode::NOT_FOUND, "product not found");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["error"], "product not found");
    }
}
