// --- File: crates/coinramp_validation/src/extract.rs ---
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, FromRef, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coinramp_common::{internal_error, IntoHttpResponse};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::info;

use crate::error::ValidationError;
use crate::pipeline::{validate_with, Validate};
use crate::registry::RuleRegistry;

/// JSON body extractor that runs the validation pipeline before the handler sees the value.
///
/// The router state must provide an `Arc<RuleRegistry>` through `FromRef`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

/// Why a `ValidatedJson` extraction failed.
#[derive(Debug)]
pub enum ValidationRejection {
    Json(JsonRejection),
    Validation(ValidationError),
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Serialize + Validate + Send,
    S: Send + Sync,
    Arc<RuleRegistry>: FromRef<S>,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;

        let registry = Arc::<RuleRegistry>::from_ref(state);
        validate_with(&registry, &value).map_err(ValidationRejection::Validation)?;

        Ok(ValidatedJson(value))
    }
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            ValidationRejection::Json(rejection) => rejection.into_response(),
            ValidationRejection::Validation(ValidationError::Invalid(violations)) => {
                info!("Rejected request with {} violation(s)", violations.len());
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let body = Json(json!({
                    "error": {
                        "message": "Validation failed",
                        "code": status.as_u16(),
                        "violations": violations,
                    }
                }));
                (status, body).into_response()
            }
            // Unknown rules and serialization failures are server bugs, not client errors.
            ValidationRejection::Validation(err) => internal_error(err).into_http_response(),
        }
    }
}
