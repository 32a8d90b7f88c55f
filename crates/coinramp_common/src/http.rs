// --- File: crates/coinramp_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{CoinrampError, HttpStatusCode};

// Include the client module
pub mod client;

/// Extension trait for CoinrampError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for CoinrampError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed with {}: {}", status_code, self);
        }

        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for CoinrampError to make it easier to use in Axum handlers.
impl IntoResponse for CoinrampError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Converts a domain result into a handler result, mapping the error through `CoinrampError`.
pub fn map_json_error<T, E>(result: Result<T, E>) -> Result<Json<T>, CoinrampError>
where
    T: serde::Serialize,
    E: Into<CoinrampError>,
{
    result.map(Json).map_err(Into::into)
}
